//! The recursive-descent stylesheet parser.
//!
//! A state machine over single-lexeme lookahead (`current`), explicit
//! `advance()`, and expectation assertions that raise a [`ParseError`]
//! and trigger local recovery. No error is fatal: bad selectors skip to
//! the next `{`, bad declarations skip to the next `;` or `}`, and the
//! accumulated diagnostics land on the returned [`Stylesheet`].

use std::str::FromStr;
use std::sync::Arc;

use crate::parser::error::{ErrorOffset, ParseError};
use crate::parser::source::{SourceLoader, SourceStack};
use crate::selector::{
    AttributeOperator, CombinatorKind, NamespacePrefix, NthKind, Selector, SelectorSequence,
    SimpleSelector, StructuralPseudoClass,
};
use crate::stylesheet::{
    Declaration, FontFace, KeyframeBlock, Keyframes, MediaExpression, MediaValue, RuleSet,
    Stylesheet, StylesheetOrigin,
};
use crate::tokenizer::{Lexeme, TokenKind, TokenType};

/// Legacy single-colon pseudo-elements from CSS 2.1.
const ARCHAIC_PSEUDO_ELEMENTS: [&str; 4] = ["first-line", "first-letter", "before", "after"];

/// Parses stylesheet text into a [`Stylesheet`], resolving `@import`s
/// through a [`SourceLoader`].
#[derive(Debug)]
pub struct StylesheetParser<L> {
    loader: L,
    sources: SourceStack,
    current: Lexeme,
    sheet: Stylesheet,
    active_media: Option<Arc<MediaExpression>>,
}

impl<L: SourceLoader> StylesheetParser<L> {
    /// A parser resolving imports through `loader`.
    #[must_use]
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            sources: SourceStack::new(),
            current: Lexeme::new(TokenKind::Eof, 0, 0, false),
            sheet: Stylesheet::new(StylesheetOrigin::Application),
            active_media: None,
        }
    }

    /// Parse a stylesheet from text with no file attribution.
    pub fn parse(&mut self, source: &str, origin: StylesheetOrigin) -> Stylesheet {
        self.begin(Stylesheet::new(origin), source, None);
        self.run();
        self.finish()
    }

    /// Load `path` through the source loader and parse it. A load
    /// failure yields an empty stylesheet carrying one error.
    pub fn parse_file(&mut self, path: &str, origin: StylesheetOrigin) -> Stylesheet {
        let mut sheet = Stylesheet::new(origin);
        sheet.file = Some(path.to_owned());
        match self.loader.load(path) {
            Ok(text) => {
                self.begin(sheet, &text, Some(path.to_owned()));
                self.run();
                self.finish()
            }
            Err(reason) => {
                let error = ParseError::SourceLoad {
                    path: path.to_owned(),
                    reason,
                    offset: ErrorOffset::Eof,
                };
                sheet.record_error(&error, Some(path));
                sheet
            }
        }
    }

    /// Parse bare declarations (no selectors, no at-rules) as an inline
    /// stylesheet: one universal rule set holding them.
    pub fn parse_inline(&mut self, source: &str) -> Stylesheet {
        self.begin(Stylesheet::new(StylesheetOrigin::Inline), source, None);
        let declarations = self.parse_declarations();
        self.sheet.rule_sets.push(RuleSet {
            selector: Selector::Sequence(SelectorSequence::universal()),
            declarations,
            media_scope: None,
            position: 0,
        });
        self.finish()
    }

    fn begin(&mut self, sheet: Stylesheet, source: &str, file: Option<String>) {
        self.sheet = sheet;
        self.sources = SourceStack::new();
        self.sources.push_source(source, file);
        self.active_media = None;
        self.advance();
    }

    fn finish(&mut self) -> Stylesheet {
        std::mem::replace(&mut self.sheet, Stylesheet::new(StylesheetOrigin::Application))
    }

    fn run(&mut self) {
        while !self.current.is_eof() {
            if let Err(error) = self.parse_statement() {
                self.record(&error);
                self.recover_statement();
            }
        }
    }

    /// Dispatch one top-level statement by its leading token.
    fn parse_statement(&mut self) -> Result<(), ParseError> {
        match &self.current.kind {
            TokenKind::AtKeyword(keyword) => match keyword.to_ascii_lowercase().as_str() {
                "import" => self.parse_import(),
                "namespace" => self.parse_namespace(),
                "media" => self.parse_media(),
                "keyframes" => self.parse_keyframes(),
                "font-face" => self.parse_font_face(),
                other => {
                    let error = ParseError::invalid(
                        format!("unsupported at-rule '@{other}'"),
                        self.offset(),
                    );
                    Err(error)
                }
            },
            _ => self.parse_rule_set(),
        }
    }

    // ── at-rules ────────────────────────────────────────────────────────

    /// `@import "path";` — splice the imported tokens in place by pushing
    /// a lexer frame, after checking the active import chain for a cycle.
    fn parse_import(&mut self) -> Result<(), ParseError> {
        let at_offset = self.offset();
        self.advance(); // @import
        let path = self.parse_string_or_url()?;

        // Cycle check and chain capture happen before the semicolon is
        // consumed: stepping past it prefetches the next token, and when
        // the import is the file's last statement that prefetch pops the
        // importing frame.
        if self.sources.is_active(&path) {
            // A no-op expansion: the already-active file is not re-read.
            let error = ParseError::ImportCycle {
                chain: self.sources.chain_with(&path),
                offset: at_offset,
            };
            self.record(&error);
            let _ = self.assert_kind(TokenType::Semicolon)?;
            return Ok(());
        }
        let chain = self.sources.active_chain();

        let _ = self.assert_kind(TokenType::Semicolon)?;
        // `current` is now the token after the semicolon; it belongs
        // after the spliced import, so it goes back to the parent frame
        // before the child frame is pushed.
        match self.loader.load(&path) {
            Ok(text) => {
                self.sources.push_back(self.current.clone());
                self.sources.push_import(&text, path, chain);
                self.advance();
            }
            Err(reason) => {
                let error = ParseError::SourceLoad {
                    path,
                    reason,
                    offset: at_offset,
                };
                self.record(&error);
            }
        }
        Ok(())
    }

    /// `@namespace [prefix] url("...");`
    fn parse_namespace(&mut self) -> Result<(), ParseError> {
        self.advance(); // @namespace
        let prefix = match &self.current.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };
        let uri = self.parse_string_or_url()?;
        let _ = self.assert_kind(TokenType::Semicolon)?;
        match prefix {
            Some(prefix) => {
                let _ = self.sheet.namespaces.insert(prefix, uri);
            }
            None => self.sheet.default_namespace = Some(uri),
        }
        Ok(())
    }

    /// `@media <expression> { ... }` — rule sets inside carry the media
    /// expression as their scope.
    fn parse_media(&mut self) -> Result<(), ParseError> {
        self.advance(); // @media
        let expression = self.parse_media_expression()?;
        let _ = self.assert_kind(TokenType::LeftBrace)?;

        self.active_media = Some(Arc::new(expression));
        while !matches!(self.current.kind, TokenKind::RightBrace | TokenKind::Eof) {
            if let Err(error) = self.parse_statement() {
                self.record(&error);
                self.recover_statement();
            }
        }
        self.active_media = None;
        let _ = self.assert_kind(TokenType::RightBrace)?;
        Ok(())
    }

    fn parse_media_expression(&mut self) -> Result<MediaExpression, ParseError> {
        let mut terms = Vec::new();
        loop {
            match self.current.kind.clone() {
                TokenKind::Ident(word) if word.eq_ignore_ascii_case("and") => self.advance(),
                // A bare medium such as `screen` is a presence test.
                TokenKind::Ident(word) => {
                    terms.push(MediaExpression::Feature {
                        name: word,
                        value: None,
                    });
                    self.advance();
                }
                TokenKind::LeftParen => {
                    self.advance();
                    let name = self.expect_ident("media feature name")?;
                    let value = if self.take(TokenType::Colon) {
                        Some(self.parse_media_value()?)
                    } else {
                        None
                    };
                    let _ = self.assert_kind(TokenType::RightParen)?;
                    terms.push(MediaExpression::Feature { name, value });
                }
                TokenKind::LeftBrace => break,
                _ => return Err(self.unexpected("media expression")),
            }
        }
        match terms.len() {
            0 => Err(self.unexpected("media expression")),
            1 => Ok(terms.remove(0)),
            _ => Ok(MediaExpression::And(terms)),
        }
    }

    fn parse_media_value(&mut self) -> Result<MediaValue, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Number(numerator) => {
                self.advance();
                if self.take(TokenType::Slash) {
                    match self.current.kind {
                        TokenKind::Number(denominator) => {
                            self.advance();
                            Ok(MediaValue::Ratio(numerator, denominator))
                        }
                        _ => Err(self.unexpected("ratio denominator")),
                    }
                } else {
                    Ok(MediaValue::Number(numerator))
                }
            }
            TokenKind::Dimension(dimension) => {
                self.advance();
                Ok(MediaValue::Dimension(dimension))
            }
            TokenKind::Ident(word) => {
                self.advance();
                Ok(MediaValue::Ident(word))
            }
            _ => Err(self.unexpected("media feature value")),
        }
    }

    /// `@keyframes name { <offsets> { declarations } ... }`
    fn parse_keyframes(&mut self) -> Result<(), ParseError> {
        self.advance(); // @keyframes
        let name = self.expect_ident("keyframes name")?;
        let _ = self.assert_kind(TokenType::LeftBrace)?;

        let mut blocks = Vec::new();
        while !matches!(self.current.kind, TokenKind::RightBrace | TokenKind::Eof) {
            match self.parse_keyframe_block() {
                Ok(mut expanded) => blocks.append(&mut expanded),
                Err(error) => {
                    self.record(&error);
                    self.recover_block();
                }
            }
        }
        let _ = self.assert_kind(TokenType::RightBrace)?;
        self.sheet.keyframes.push(Keyframes { name, blocks });
        Ok(())
    }

    /// One keyframe entry. A comma-grouped offset list expands into one
    /// block per offset, sharing the declarations.
    fn parse_keyframe_block(&mut self) -> Result<Vec<KeyframeBlock>, ParseError> {
        let mut offsets = vec![self.parse_keyframe_offset()?];
        while self.take(TokenType::Comma) {
            offsets.push(self.parse_keyframe_offset()?);
        }
        let _ = self.assert_kind(TokenType::LeftBrace)?;
        let declarations = self.parse_declarations();
        let _ = self.assert_kind(TokenType::RightBrace)?;

        Ok(offsets
            .into_iter()
            .map(|offset| KeyframeBlock {
                offset,
                declarations: declarations.clone(),
            })
            .collect())
    }

    /// `from` (0), `to` (1), or an explicit percentage in [0,1].
    fn parse_keyframe_offset(&mut self) -> Result<f32, ParseError> {
        let offset = match &self.current.kind {
            TokenKind::Ident(word) if word.eq_ignore_ascii_case("from") => 0.0,
            TokenKind::Ident(word) if word.eq_ignore_ascii_case("to") => 1.0,
            TokenKind::Dimension(d) if d.unit.is_percentage() => d.as_fraction().clamp(0.0, 1.0),
            _ => return Err(self.unexpected("'from', 'to', or a percentage")),
        };
        self.advance();
        Ok(offset)
    }

    /// `@font-face { declarations }`
    fn parse_font_face(&mut self) -> Result<(), ParseError> {
        self.advance(); // @font-face
        let _ = self.assert_kind(TokenType::LeftBrace)?;
        let declarations = self.parse_declarations();
        let _ = self.assert_kind(TokenType::RightBrace)?;
        self.sheet.font_faces.push(FontFace { declarations });
        Ok(())
    }

    // ── rule sets and selectors ─────────────────────────────────────────

    /// A selector group plus its declaration block. A comma-separated
    /// group expands into one rule set per selector sharing the
    /// declarations; a bad selector records its error and resumes at the
    /// block so the declarations still parse.
    fn parse_rule_set(&mut self) -> Result<(), ParseError> {
        let selectors = match self.parse_selector_group() {
            Ok(selectors) => selectors,
            Err(error) => {
                self.record(&error);
                self.skip_to_left_brace();
                Vec::new()
            }
        };
        let _ = self.assert_kind(TokenType::LeftBrace)?;
        let declarations = self.parse_declarations();
        let _ = self.assert_kind(TokenType::RightBrace)?;

        for selector in selectors {
            let position = self.sheet.rule_sets.len();
            self.sheet.rule_sets.push(RuleSet {
                selector,
                declarations: declarations.clone(),
                media_scope: self.active_media.clone(),
                position,
            });
        }
        Ok(())
    }

    fn parse_selector_group(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector_chain()?];
        while self.take(TokenType::Comma) {
            selectors.push(self.parse_selector_chain()?);
        }
        Ok(selectors)
    }

    /// A left-associative chain of sequences joined by explicit
    /// combinators or implicit descendant combination (adjacency with no
    /// operator token).
    fn parse_selector_chain(&mut self) -> Result<Selector, ParseError> {
        let mut chain = Selector::Sequence(self.parse_selector_sequence()?);
        loop {
            let kind = match self.current.token_type() {
                TokenType::Greater => {
                    self.advance();
                    CombinatorKind::Child
                }
                TokenType::Tilde => {
                    self.advance();
                    CombinatorKind::Sibling
                }
                TokenType::Plus => {
                    self.advance();
                    CombinatorKind::AdjacentSibling
                }
                _ if self.at_sequence_start() && self.current.ws_before => {
                    CombinatorKind::Descendant
                }
                _ => break,
            };
            let right = Selector::Sequence(self.parse_selector_sequence()?);
            chain = Selector::combine(kind, chain, right);
        }
        Ok(chain)
    }

    fn at_sequence_start(&self) -> bool {
        matches!(
            self.current.token_type(),
            TokenType::Ident
                | TokenType::Star
                | TokenType::Pipe
                | TokenType::Hash
                | TokenType::Dot
                | TokenType::LeftBracket
                | TokenType::Colon
                | TokenType::DoubleColon
        )
    }

    /// One simple-selector sequence: optional namespace + type or
    /// universal part, then modifiers up to the next whitespace gap,
    /// combinator, comma, or `{`.
    fn parse_selector_sequence(&mut self) -> Result<SelectorSequence, ParseError> {
        let mut sequence = SelectorSequence::universal();
        let mut seen = false;

        match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                if self.at_namespace_separator() {
                    self.advance(); // |
                    sequence.namespace = self.resolve_namespace_prefix(&name);
                    sequence.local_name = self.parse_local_part()?;
                } else {
                    sequence.namespace = self.default_namespace_prefix();
                    sequence.local_name = Some(name);
                }
                seen = true;
            }
            TokenKind::Star => {
                self.advance();
                if self.at_namespace_separator() {
                    self.advance(); // |
                    sequence.namespace = NamespacePrefix::Any;
                    sequence.local_name = self.parse_local_part()?;
                } else {
                    sequence.namespace = self.default_namespace_prefix();
                }
                seen = true;
            }
            TokenKind::Pipe => {
                self.advance();
                sequence.namespace = NamespacePrefix::NoNamespace;
                sequence.local_name = self.parse_local_part()?;
                seen = true;
            }
            _ => {}
        }

        // Modifiers bind tightly: a whitespace gap ends the sequence and
        // becomes a descendant combinator.
        loop {
            if seen && self.current.ws_before {
                break;
            }
            match self.current.token_type() {
                TokenType::Hash | TokenType::Dot | TokenType::LeftBracket | TokenType::Colon => {
                    match self.parse_modifier(true)? {
                        Modifier::Simple(modifier) => sequence.modifiers.push(modifier),
                        Modifier::PseudoElement(name) => {
                            sequence.pseudo_element = Some(name);
                            seen = true;
                            break;
                        }
                    }
                    seen = true;
                }
                TokenType::DoubleColon => {
                    self.advance();
                    sequence.pseudo_element = Some(self.expect_ident("pseudo-element name")?);
                    seen = true;
                    break;
                }
                _ => break,
            }
        }

        if seen {
            Ok(sequence)
        } else {
            Err(self.unexpected("selector"))
        }
    }

    /// The `name` or `*` after a namespace separator.
    fn parse_local_part(&mut self) -> Result<Option<String>, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Some(name))
            }
            TokenKind::Star => {
                self.advance();
                Ok(None)
            }
            _ => Err(self.unexpected("IDENTIFIER or '*' after namespace prefix")),
        }
    }

    /// A `|` directly after a type or `*` part is a namespace separator
    /// (the attribute operator `|=` lexes as one token, so no conflict).
    fn at_namespace_separator(&self) -> bool {
        self.current.token_type() == TokenType::Pipe && !self.current.ws_before
    }

    /// Resolve a written namespace prefix through the `@namespace`
    /// declarations. An unknown prefix records an error and falls back to
    /// matching any namespace, keeping the rest of the rule usable.
    fn resolve_namespace_prefix(&mut self, prefix: &str) -> NamespacePrefix {
        match self.sheet.namespace_uri(prefix) {
            Some(uri) => NamespacePrefix::Uri(uri.to_owned()),
            None => {
                let error = ParseError::invalid(
                    format!("unknown namespace prefix '{prefix}'"),
                    self.offset(),
                );
                self.record(&error);
                NamespacePrefix::Any
            }
        }
    }

    /// The namespace an unprefixed selector matches: the default
    /// namespace when one is declared, otherwise any.
    fn default_namespace_prefix(&self) -> NamespacePrefix {
        self.sheet
            .default_namespace
            .clone()
            .map_or(NamespacePrefix::Any, NamespacePrefix::Uri)
    }

    /// One modifier: `#id`, `.class`, `[attr...]`, or a `:pseudo` form.
    fn parse_modifier(&mut self, allow_negation: bool) -> Result<Modifier, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Hash(id) => {
                self.advance();
                Ok(Modifier::Simple(SimpleSelector::Id(id)))
            }
            TokenKind::Dot => {
                self.advance();
                let class = self.expect_ident("class name after '.'")?;
                Ok(Modifier::Simple(SimpleSelector::Class(class)))
            }
            TokenKind::LeftBracket => Ok(Modifier::Simple(self.parse_attribute_selector()?)),
            TokenKind::Colon => {
                self.advance();
                self.parse_pseudo(allow_negation)
            }
            _ => Err(self.unexpected("simple selector")),
        }
    }

    /// `[name]` or `[name <op> value]`.
    fn parse_attribute_selector(&mut self) -> Result<SimpleSelector, ParseError> {
        self.advance(); // [
        let name = self.expect_ident("attribute name")?;
        let op = match self.current.token_type() {
            TokenType::RightBracket => {
                self.advance();
                return Ok(SimpleSelector::Attribute {
                    name,
                    op: AttributeOperator::Exists,
                    value: None,
                });
            }
            TokenType::Equals => AttributeOperator::Equals,
            TokenType::Includes => AttributeOperator::Includes,
            TokenType::DashMatch => AttributeOperator::DashMatch,
            TokenType::PrefixMatch => AttributeOperator::PrefixMatch,
            TokenType::SuffixMatch => AttributeOperator::SuffixMatch,
            TokenType::SubstringMatch => AttributeOperator::SubstringMatch,
            _ => return Err(self.unexpected("attribute operator or ']'")),
        };
        self.advance();
        let value = match self.current.kind.clone() {
            TokenKind::Ident(v) | TokenKind::QuotedString(v) => {
                self.advance();
                v
            }
            _ => return Err(self.unexpected("attribute value")),
        };
        let _ = self.assert_kind(TokenType::RightBracket)?;
        Ok(SimpleSelector::Attribute {
            name,
            op,
            value: Some(value),
        })
    }

    /// Everything after a single `:` — a structural or state
    /// pseudo-class, an `nth-*` function, a negation, or an archaic
    /// single-colon pseudo-element.
    fn parse_pseudo(&mut self, allow_negation: bool) -> Result<Modifier, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                let lowered = name.to_ascii_lowercase();
                if ARCHAIC_PSEUDO_ELEMENTS.contains(&lowered.as_str()) {
                    return Ok(Modifier::PseudoElement(lowered));
                }
                if let Ok(structural) = StructuralPseudoClass::from_str(&lowered) {
                    return Ok(Modifier::Simple(SimpleSelector::PseudoClass(structural)));
                }
                // Anything else is a declared-state pseudo-class such as
                // :pressed or :checked.
                Ok(Modifier::Simple(SimpleSelector::State(name)))
            }
            TokenKind::Function(name) => {
                if let Ok(kind) = NthKind::from_str(&name) {
                    self.advance();
                    let (modulus, remainder) = self.parse_nth_argument()?;
                    let _ = self.assert_kind(TokenType::RightParen)?;
                    return Ok(Modifier::Simple(SimpleSelector::Nth {
                        kind,
                        modulus,
                        remainder,
                    }));
                }
                if name.eq_ignore_ascii_case("not") {
                    if !allow_negation {
                        return Err(ParseError::invalid(
                            "negation cannot contain another negation",
                            self.offset(),
                        ));
                    }
                    self.advance();
                    let argument = self.parse_negation_argument()?;
                    let _ = self.assert_kind(TokenType::RightParen)?;
                    return Ok(Modifier::Simple(SimpleSelector::Not(Box::new(argument))));
                }
                Err(self.unexpected("supported pseudo-class function"))
            }
            _ => Err(self.unexpected("pseudo-class name")),
        }
    }

    /// The argument of `:not(...)`: exactly one type/universal selector
    /// or one simple selector, never a selector group or nested negation.
    fn parse_negation_argument(&mut self) -> Result<Selector, ParseError> {
        let mut sequence = SelectorSequence::universal();
        match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                sequence.local_name = Some(name);
            }
            TokenKind::Star => self.advance(),
            TokenKind::Hash(_) | TokenKind::Dot | TokenKind::LeftBracket | TokenKind::Colon => {
                match self.parse_modifier(false)? {
                    Modifier::Simple(modifier) => sequence.modifiers.push(modifier),
                    Modifier::PseudoElement(_) => {
                        return Err(ParseError::invalid(
                            "pseudo-element is not a valid negation argument",
                            self.offset(),
                        ));
                    }
                }
            }
            _ => return Err(self.unexpected("simple selector inside :not()")),
        }
        Ok(Selector::Sequence(sequence))
    }

    /// The `an+b` argument grammar of the `nth-*` family: `odd`/`even`,
    /// a bare integer (modulus 1), `n`/`-n` with optional coefficient,
    /// and an optional signed remainder after the `n`.
    #[allow(clippy::cast_possible_truncation)]
    fn parse_nth_argument(&mut self) -> Result<(i32, i32), ParseError> {
        // A leading `+` before the coefficient or `n` is permitted.
        let _ = self.take(TokenType::Plus);

        match self.current.kind.clone() {
            TokenKind::Ident(word) if word.eq_ignore_ascii_case("odd") => {
                self.advance();
                Ok((2, 1))
            }
            TokenKind::Ident(word) if word.eq_ignore_ascii_case("even") => {
                self.advance();
                Ok((2, 0))
            }
            TokenKind::Ident(word) => {
                let (modulus, remainder) = self.nth_word(&word, None)?;
                self.advance();
                match remainder {
                    Some(remainder) => Ok((modulus, remainder)),
                    None => Ok((modulus, self.nth_remainder()?)),
                }
            }
            TokenKind::Number(value) => {
                self.advance();
                let coefficient = value as i32;
                match self.current.kind.clone() {
                    // `2n`, `2n+1` (`n` and any `-b` tail lex as one
                    // identifier after the number).
                    TokenKind::Ident(word) => {
                        let (modulus, remainder) = self.nth_word(&word, Some(coefficient))?;
                        self.advance();
                        match remainder {
                            Some(remainder) => Ok((modulus, remainder)),
                            None => Ok((modulus, self.nth_remainder()?)),
                        }
                    }
                    // A bare integer selects indices from that value.
                    _ => Ok((1, coefficient)),
                }
            }
            _ => Err(self.unexpected("'odd', 'even', an integer, or an+b")),
        }
    }

    /// Interpret the identifier part of an `an+b` form: `n`, `-n`,
    /// `n-<b>`, `-n-<b>`. Returns the modulus and, when the `-<b>` tail
    /// is fused into the identifier, the (negative) remainder.
    fn nth_word(
        &self,
        word: &str,
        coefficient: Option<i32>,
    ) -> Result<(i32, Option<i32>), ParseError> {
        let lowered = word.to_ascii_lowercase();
        let (negated, rest) = match lowered.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, lowered.as_str()),
        };
        let Some(tail) = rest.strip_prefix('n') else {
            return Err(self.unexpected("'n' in an+b expression"));
        };
        if negated && coefficient.is_some() {
            return Err(self.unexpected("a single sign on the an+b coefficient"));
        }

        let modulus = coefficient.unwrap_or(1) * if negated { -1 } else { 1 };
        if tail.is_empty() {
            return Ok((modulus, None));
        }
        match tail.strip_prefix('-').map(str::parse::<i32>) {
            Some(Ok(magnitude)) => Ok((modulus, Some(-magnitude))),
            _ => Err(self.unexpected("signed remainder after 'n'")),
        }
    }

    /// An optional explicit remainder after the `n`: a signed number, or
    /// a `+` token followed by a number when whitespace separated them.
    #[allow(clippy::cast_possible_truncation)]
    fn nth_remainder(&mut self) -> Result<i32, ParseError> {
        if self.take(TokenType::Plus) {
            match self.current.kind {
                TokenKind::Number(value) => {
                    self.advance();
                    return Ok(value as i32);
                }
                _ => return Err(self.unexpected("remainder after '+'")),
            }
        }
        match self.current.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(value as i32)
            }
            _ => Ok(0),
        }
    }

    // ── declarations ────────────────────────────────────────────────────

    /// Declarations up to the enclosing `}`. A bad declaration records
    /// its error and skips to the next `;` or `}`; the rest of the block
    /// still parses.
    fn parse_declarations(&mut self) -> Vec<Declaration> {
        let mut declarations = Vec::new();
        loop {
            match self.current.kind {
                TokenKind::RightBrace | TokenKind::Eof => break,
                TokenKind::Semicolon => self.advance(),
                _ => match self.parse_declaration() {
                    Ok(declaration) => declarations.push(declaration),
                    Err(error) => {
                        self.record(&error);
                        self.recover_declaration();
                    }
                },
            }
        }
        declarations
    }

    /// One `name: value [!important]` declaration. The value is not
    /// interpreted here — it is collected as raw lexemes up to the next
    /// `;` or `}` and parsed by the value parser on demand.
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let name = self.expect_ident("property name")?;
        let _ = self.assert_kind(TokenType::Colon)?;

        let mut lexemes: Vec<Lexeme> = Vec::new();
        let mut important = false;
        loop {
            match &self.current.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    break;
                }
                TokenKind::RightBrace | TokenKind::Eof => break,
                TokenKind::Bang => {
                    self.advance();
                    let word = self.expect_ident("'important' after '!'")?;
                    if !word.eq_ignore_ascii_case("important") {
                        return Err(ParseError::invalid(
                            format!("unexpected '!{word}' annotation"),
                            self.offset(),
                        ));
                    }
                    important = true;
                }
                TokenKind::Colon if matches!(
                    lexemes.last().map(Lexeme::token_type),
                    Some(TokenType::Ident)
                ) =>
                {
                    // Missing-semicolon heuristic: an identifier directly
                    // followed by a colon at the tail of the value is
                    // actually the next declaration's property name. Push
                    // the colon back and re-offer the identifier as the
                    // current lexeme. Known fragile when a value
                    // legitimately ends in an identifier that a stray
                    // colon follows.
                    let property = match lexemes.pop() {
                        Some(lexeme) => lexeme,
                        None => break,
                    };
                    self.sources.push_back(self.current.clone());
                    self.current = property;
                    break;
                }
                _ => {
                    lexemes.push(self.current.clone());
                    self.advance();
                }
            }
        }

        if lexemes.is_empty() {
            return Err(ParseError::invalid(
                format!("declaration '{name}' has no value"),
                self.offset(),
            ));
        }

        let first = &lexemes[0];
        let last = &lexemes[lexemes.len() - 1];
        let raw_value = self.sources.slice(first.offset, last.offset + last.len);
        Ok(Declaration {
            name,
            raw_value,
            source_offset: first.offset,
            file: self.sources.current_file().map(str::to_owned),
            important,
            lexemes,
        })
    }

    // ── shared small grammars ───────────────────────────────────────────

    /// A `url(...)` token, a `url("...")` function form, or a bare
    /// quoted string.
    fn parse_string_or_url(&mut self) -> Result<String, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Url(value) | TokenKind::QuotedString(value) => {
                self.advance();
                Ok(value)
            }
            TokenKind::Function(name) if name.eq_ignore_ascii_case("url") => {
                self.advance();
                let value = match self.current.kind.clone() {
                    TokenKind::QuotedString(value) => {
                        self.advance();
                        value
                    }
                    _ => return Err(self.unexpected("STRING inside url()")),
                };
                let _ = self.assert_kind(TokenType::RightParen)?;
                Ok(value)
            }
            _ => Err(self.unexpected("URL or STRING")),
        }
    }

    // ── cursor, assertions, recovery ────────────────────────────────────

    fn advance(&mut self) {
        self.current = self.sources.next_lexeme();
    }

    /// Consume the current lexeme if it has the given type.
    fn take(&mut self, kind: TokenType) -> bool {
        if self.current.token_type() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Assert the current lexeme's type and consume it.
    fn assert_kind(&mut self, kind: TokenType) -> Result<Lexeme, ParseError> {
        if self.current.token_type() == kind {
            let lexeme = self.current.clone();
            self.advance();
            Ok(lexeme)
        } else {
            Err(self.unexpected(&kind.to_string()))
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.current.kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    fn offset(&self) -> ErrorOffset {
        if self.current.is_eof() {
            ErrorOffset::Eof
        } else {
            ErrorOffset::At(self.current.offset)
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::Unexpected {
            expected: expected.to_owned(),
            found: self.current.kind.to_string(),
            offset: self.offset(),
        }
    }

    fn record(&mut self, error: &ParseError) {
        let file = self
            .sources
            .current_file()
            .map(str::to_owned)
            .or_else(|| self.sheet.file.clone());
        self.sheet.record_error(error, file.as_deref());
    }

    /// Recover from a failed statement: skip to the end of the current
    /// block (brace-aware) or past the next top-level semicolon.
    fn recover_statement(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::Semicolon if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::LeftBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RightBrace => {
                    self.advance();
                    if depth <= 1 {
                        return;
                    }
                    depth -= 1;
                }
                _ => self.advance(),
            }
        }
    }

    /// Recover from a failed declaration: skip to the next `;`
    /// (consumed) or `}` (left for the block parser).
    fn recover_declaration(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Eof | TokenKind::RightBrace => return,
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                _ => self.advance(),
            }
        }
    }

    /// Recover from a failed selector: skip forward to the `{` so the
    /// declaration block still parses.
    fn skip_to_left_brace(&mut self) {
        while !matches!(self.current.kind, TokenKind::LeftBrace | TokenKind::Eof) {
            self.advance();
        }
    }

    /// Recover inside `@keyframes`: skip one malformed block.
    fn recover_block(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current.kind {
                TokenKind::Eof => return,
                TokenKind::LeftBrace => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::RightBrace => {
                    if depth == 0 {
                        return;
                    }
                    self.advance();
                    if depth == 1 {
                        return;
                    }
                    depth -= 1;
                }
                _ => self.advance(),
            }
        }
    }
}

/// What a `:`-prefixed component parsed to.
enum Modifier {
    Simple(SimpleSelector),
    PseudoElement(String),
}
