//! Recursive-descent pattern parser.
//!
//! The parser walks the pattern once, left to right, building fragments as it
//! goes. Each open group saves the alternatives being assembled at the outer
//! level; closing the group restores them and appends the group's machine.

use vmregex_core::{
    AssertKind, CharClass, ClassItem, GROUP_NESTING_MAX, GROUP_REG_COUNT, Machine, MatchPolicy, NamedClass,
    PatternFlags, Recognizer, SearchPreference, named_literal,
};

use crate::builder::MachineBuilder;
use crate::error::{CompileError, CompileResult, SyntaxErrorKind};

const INTERVAL_MAX: u64 = 65_535;

#[derive(Clone, Copy)]
enum Toggle {
    Case(bool),
    Policy(MatchPolicy),
    Preference(SearchPreference),
}

const TOGGLES: &[(&str, Toggle)] = &[
    ("<Case>", Toggle::Case(true)),
    ("<NoCase>", Toggle::Case(false)),
    ("<Max>", Toggle::Policy(MatchPolicy::Longest)),
    ("<Min>", Toggle::Policy(MatchPolicy::Shortest)),
    ("<FB>", Toggle::Preference(SearchPreference::FirstBegin)),
    ("<FirstBegin>", Toggle::Preference(SearchPreference::FirstBegin)),
    ("<FE>", Toggle::Preference(SearchPreference::FirstEnd)),
    ("<FirstEnd>", Toggle::Preference(SearchPreference::FirstEnd)),
];

pub(crate) struct Parsed {
    pub builder: MachineBuilder,
    pub machine: Machine,
    pub group_count: u8,
    pub loop_var_count: u8,
    pub flags: PatternFlags,
}

/// Alternatives of one nesting level: the sequence being concatenated and
/// the alternation of everything before the last `|`.
#[derive(Default)]
struct Alternatives {
    cur: Option<Machine>,
    alter: Option<Machine>,
}

enum GroupKind {
    Capture(u8),
    Plain,
    Assert(AssertKind),
}

struct OpenGroup {
    outer: Alternatives,
    kind: GroupKind,
}

pub(crate) struct Parser {
    chars: Vec<(usize, char)>,
    source_len: usize,
    pos: usize,
    builder: MachineBuilder,
    level: Alternatives,
    stack: Vec<OpenGroup>,
    groups_opened: usize,
    loop_var_count: u8,
    flags: PatternFlags,
}

impl Parser {
    pub fn new(source: &str, builder: MachineBuilder) -> Self {
        Self {
            chars: source.char_indices().collect(),
            source_len: source.len(),
            pos: 0,
            builder,
            level: Alternatives::default(),
            stack: Vec::new(),
            groups_opened: 0,
            loop_var_count: 0,
            flags: PatternFlags::default(),
        }
    }

    pub fn parse(mut self) -> CompileResult<Parsed> {
        while let Some(c) = self.peek() {
            let atom = match c {
                '^' if self.level.cur.is_none() => {
                    self.bump();
                    self.push_anchor(Recognizer::TextBegin)?;
                    continue;
                }
                '$' if self.ends_alternative(self.pos + 1) => {
                    self.bump();
                    self.push_anchor(Recognizer::TextEnd)?;
                    continue;
                }
                '(' => {
                    self.open_group()?;
                    continue;
                }
                ')' => {
                    self.bump();
                    if self.stack.is_empty() {
                        continue;
                    }
                    self.close_group()?
                }
                '|' => {
                    self.bump();
                    self.next_alternative()?;
                    continue;
                }
                '<' => match self.angle()? {
                    Some(m) => m,
                    None => continue,
                },
                '%' => match self.escape()? {
                    Some(m) => m,
                    None => continue,
                },
                '.' => {
                    self.bump();
                    self.builder.build_special(Recognizer::Wildcard)?
                }
                '[' => self.bracket()?,
                _ => {
                    self.bump();
                    self.builder.build_char(c)?
                }
            };
            let atom = self.postfix(atom)?;
            self.builder.concat_onto(&mut self.level.cur, atom)?;
        }

        while !self.stack.is_empty() {
            let m = self.close_group()?;
            self.builder.concat_onto(&mut self.level.cur, m)?;
        }

        let level = std::mem::take(&mut self.level);
        let machine = match self.finish_alternatives(level)? {
            Some(m) => m,
            None => self.builder.build_empty()?,
        };

        Ok(Parsed {
            builder: self.builder,
            machine,
            group_count: self.groups_opened.min(GROUP_REG_COUNT) as u8,
            loop_var_count: self.loop_var_count,
            flags: self.flags,
        })
    }

    /// Byte offset of the cursor in the source.
    fn offset(&self) -> usize {
        self.chars.get(self.pos).map_or(self.source_len, |(offset, _)| *offset)
    }

    fn peek(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    fn char_at(&self, pos: usize) -> Option<char> {
        self.chars.get(pos).map(|(_, c)| *c)
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        let len = s.chars().count();
        let matches = self.chars.len() >= self.pos + len
            && self.chars[self.pos..self.pos + len].iter().map(|(_, c)| *c).eq(s.chars());
        if matches {
            self.pos += len;
        }
        matches
    }

    fn starts_with_ignore_case(&self, s: &str) -> bool {
        let mut rest = self.chars[self.pos..].iter().map(|(_, c)| *c);
        s.chars()
            .all(|want| rest.next().is_some_and(|c| c.eq_ignore_ascii_case(&want)))
    }

    /// `$` is an anchor only where an alternative ends.
    fn ends_alternative(&self, pos: usize) -> bool {
        matches!(self.char_at(pos), None | Some(')' | '|'))
    }

    fn push_anchor(&mut self, recognizer: Recognizer) -> CompileResult<()> {
        let m = self.builder.build_special(recognizer)?;
        self.builder.concat_onto(&mut self.level.cur, m)
    }

    fn next_alternative(&mut self) -> CompileResult<()> {
        let lhs = match self.level.cur.take() {
            Some(m) => m,
            None => self.builder.build_empty()?,
        };
        let alter = match self.level.alter.take() {
            Some(prev) => self.builder.build_alter(prev, lhs)?,
            None => lhs,
        };
        self.level.alter = Some(alter);
        Ok(())
    }

    fn finish_alternatives(&mut self, level: Alternatives) -> CompileResult<Option<Machine>> {
        let Some(alter) = level.alter else {
            return Ok(level.cur);
        };
        let rhs = match level.cur {
            Some(m) => m,
            None => self.builder.build_empty()?,
        };
        self.builder.build_alter(alter, rhs).map(Some)
    }

    fn open_group(&mut self) -> CompileResult<()> {
        if self.stack.len() >= GROUP_NESTING_MAX {
            return Err(CompileError::GroupNestingTooDeep { offset: self.offset() });
        }
        self.bump();

        let kind = if self.eat_str("?:") {
            GroupKind::Plain
        } else if self.eat_str("?=") {
            GroupKind::Assert(AssertKind::Ahead)
        } else if self.eat_str("?!") {
            GroupKind::Assert(AssertKind::NotAhead)
        } else if self.eat_str("?<=") {
            GroupKind::Assert(AssertKind::Behind)
        } else if self.eat_str("?<!") {
            GroupKind::Assert(AssertKind::NotBehind)
        } else {
            let id = self.groups_opened;
            self.groups_opened += 1;
            if id < GROUP_REG_COUNT {
                GroupKind::Capture(id as u8)
            } else {
                GroupKind::Plain
            }
        };

        let outer = std::mem::take(&mut self.level);
        self.stack.push(OpenGroup { outer, kind });
        Ok(())
    }

    fn close_group(&mut self) -> CompileResult<Machine> {
        let Some(group) = self.stack.pop() else {
            return self.builder.build_empty();
        };
        let inner = std::mem::replace(&mut self.level, group.outer);
        let mut body = self.finish_alternatives(inner)?;

        // A lookbehind body must end exactly where the assertion started.
        if let GroupKind::Assert(kind) = group.kind
            && kind.is_lookbehind()
        {
            let anchor = self.builder.build_special(Recognizer::LookbackPos)?;
            self.builder.concat_onto(&mut body, anchor)?;
        }

        let body = match body {
            Some(m) => m,
            None => self.builder.build_empty()?,
        };
        match group.kind {
            GroupKind::Capture(id) => self.builder.build_group(body, id),
            GroupKind::Plain => Ok(body),
            GroupKind::Assert(kind) => self.builder.build_assert(body, kind),
        }
    }

    /// `<...>`: a mode toggle, a class expression, or a literal `<`.
    fn angle(&mut self) -> CompileResult<Option<Machine>> {
        for (spelling, toggle) in TOGGLES {
            if self.starts_with_ignore_case(spelling) {
                self.pos += spelling.chars().count();
                match *toggle {
                    Toggle::Case(sensitive) => self.flags.case_sensitive = Some(sensitive),
                    Toggle::Policy(policy) => self.flags.policy = policy,
                    Toggle::Preference(preference) => self.flags.preference = preference,
                }
                return Ok(None);
            }
        }

        if let Some(m) = self.class_expr()? {
            return Ok(Some(m));
        }
        self.bump();
        self.builder.build_char('<').map(Some)
    }

    /// Parses `<a|x-z|alpha>` starting at `<`. Leaves the position untouched
    /// and returns `None` when the text is not a well-formed class expression.
    fn class_expr(&mut self) -> CompileResult<Option<Machine>> {
        let mut i = self.pos + 1;
        let negated = self.char_at(i) == Some('^');
        if negated {
            i += 1;
        }

        let mut class = CharClass::new(negated);
        loop {
            let start = i;
            while let Some(c) = self.char_at(i)
                && c != '>'
                && c != '|'
            {
                i += 1;
            }
            let Some(delim) = self.char_at(i) else {
                return Ok(None);
            };

            let segment: Vec<char> = self.chars[start..i].iter().map(|(_, c)| *c).collect();
            match segment.as_slice() {
                [c] => class.push_char(*c),
                [lo, '-', hi] => class.push_range(*lo, *hi),
                _ => {
                    let name: String = segment.iter().collect();
                    if let Some(named) = NamedClass::from_name(&name) {
                        class.push_named(named);
                    } else if let Some(c) = named_literal(&name) {
                        class.push_char(c);
                    } else {
                        return Ok(None);
                    }
                }
            }

            i += 1;
            if delim == '>' {
                break;
            }
        }
        self.pos = i;

        let m = match class.items.as_slice() {
            [ClassItem::Named(named)] => self.builder.build_special(Recognizer::Class {
                class: *named,
                negated,
            })?,
            _ => self.builder.build_char_range(class)?,
        };
        Ok(Some(m))
    }

    /// `%c` sequences. Zero-width ones are appended directly.
    fn escape(&mut self) -> CompileResult<Option<Machine>> {
        self.bump();
        let Some(c) = self.peek() else {
            return Ok(None);
        };
        self.bump();

        let recognizer = match c {
            '1'..='9' => {
                let group = c as u8 - b'1';
                return self.builder.build_group_matcher(group).map(Some);
            }
            '<' | '>' | 'b' | 'B' => {
                let anchor = match c {
                    '<' => Recognizer::WordBegin,
                    '>' => Recognizer::WordEnd,
                    'b' => Recognizer::WordBoundary,
                    _ => Recognizer::NonWordBoundary,
                };
                self.push_anchor(anchor)?;
                return Ok(None);
            }
            'w' => Recognizer::WordChar,
            'W' => Recognizer::NonWordChar,
            's' | 'S' => named(NamedClass::Space, c == 'S'),
            'd' | 'D' => named(NamedClass::Digit, c == 'D'),
            'v' | 'V' => named(NamedClass::VSpace, c == 'V'),
            _ => Recognizer::Literal(c),
        };
        self.builder.build_special(recognizer).map(Some)
    }

    fn bracket(&mut self) -> CompileResult<Machine> {
        let offset = self.offset();
        self.bump();

        let mut class = CharClass::new(self.eat('^'));
        if self.eat(']') {
            class.push_char(']');
        } else if self.eat('-') {
            class.push_char('-');
        }

        loop {
            let Some(lo) = self.peek() else {
                return Err(CompileError::Syntax {
                    offset,
                    kind: SyntaxErrorKind::UnterminatedClass,
                });
            };
            self.bump();
            if lo == ']' {
                break;
            }
            match (self.peek(), self.char_at(self.pos + 1)) {
                (Some('-'), Some(hi)) if hi != ']' => {
                    self.pos += 2;
                    class.push_range(lo, hi);
                }
                _ => class.push_char(lo),
            }
        }
        self.builder.build_char_range(class)
    }

    fn postfix(&mut self, atom: Machine) -> CompileResult<Machine> {
        let m = match self.peek() {
            Some(op @ ('*' | '+' | '?')) => {
                self.bump();
                let lazy = self.eat('?');
                if op != '?' && self.builder.can_match_empty(atom) {
                    // Counted, so an iteration that consumed nothing ends the loop.
                    let var = self.loop_var();
                    self.builder.build_interval(atom, u32::from(op == '+'), None, var, lazy)?
                } else {
                    self.builder.build_closure(atom, op, lazy)?
                }
            }
            Some('{') => self.interval(atom)?,
            _ => return Ok(atom),
        };
        self.skip_redundant_postfix();
        Ok(m)
    }

    fn interval(&mut self, atom: Machine) -> CompileResult<Machine> {
        let offset = self.offset();
        let syntax = |kind| CompileError::Syntax { offset, kind };
        self.bump();

        let low = self.number().ok_or(syntax(SyntaxErrorKind::IntervalTooLarge))?;
        let (min, max) = if self.eat(',') {
            let high = self.number().ok_or(syntax(SyntaxErrorKind::IntervalTooLarge))?;
            (low.unwrap_or(0), high)
        } else {
            match low {
                Some(n) => (n, Some(n)),
                None => (0, None),
            }
        };

        if !self.eat('}') {
            return Err(syntax(SyntaxErrorKind::MalformedInterval));
        }
        if let Some(max) = max
            && min > max
        {
            return Err(syntax(SyntaxErrorKind::IntervalBounds));
        }

        let lazy = self.eat('?');
        let var = self.loop_var();
        self.builder.build_interval(atom, min, max, var, lazy)
    }

    /// Loop variable for a repetition at the current group depth.
    fn loop_var(&mut self) -> u8 {
        let var = self.stack.len() as u8;
        self.loop_var_count = self.loop_var_count.max(var + 1);
        var
    }

    /// Decimal digits at the cursor. `Some(None)` when there are none,
    /// `None` when the value is out of range.
    fn number(&mut self) -> Option<Option<u32>> {
        let mut value: Option<u64> = None;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            self.bump();
            let next = value.unwrap_or(0) * 10 + d as u64;
            if next > INTERVAL_MAX {
                return None;
            }
            value = Some(next);
        }
        Some(value.map(|v| v as u32))
    }

    fn skip_redundant_postfix(&mut self) {
        loop {
            match self.peek() {
                Some('*' | '+' | '?') => self.bump(),
                Some('{') => match self.chars[self.pos..].iter().position(|(_, c)| *c == '}') {
                    Some(len) => self.pos += len + 1,
                    None => break,
                },
                _ => break,
            }
        }
    }
}

fn named(class: NamedClass, negated: bool) -> Recognizer {
    Recognizer::Class { class, negated }
}
