//! Builder-pattern printer for compile errors.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::error::CompileError;

pub struct CompileErrorPrinter<'e, 's> {
    error: &'e CompileError,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'e, 's> CompileErrorPrinter<'e, 's> {
    pub fn new(error: &'e CompileError) -> Self {
        Self {
            error,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let message = self.error.to_string();
        let (Some(source), Some(offset)) = (self.source, self.error.offset()) else {
            return write!(w, "error: {message}");
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(point_range(source, offset)).label(label(self.error)));
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }

        let report = vec![Level::ERROR.primary_title(&message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

impl CompileError {
    pub fn printer(&self) -> CompileErrorPrinter<'_, '_> {
        CompileErrorPrinter::new(self)
    }
}

fn label(error: &CompileError) -> &'static str {
    match error {
        CompileError::GroupNestingTooDeep { .. } => "this group exceeds the nesting limit",
        CompileError::Syntax { .. } => "here",
        CompileError::OutOfMemory { .. } => "",
    }
}

/// One char at `offset`, or an empty span at the end of the source.
fn point_range(source: &str, offset: usize) -> std::ops::Range<usize> {
    let offset = offset.min(source.len());
    let width = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    offset..offset + width
}
