//! Route definition language.
//!
//! Definitions mix literal text with parameters and optional groups:
//!
//! - `/users/:id` - parameter matching up to the next separator
//! - `/:slug{-}` - parameter with its own delimiter set
//! - `/:controller[/:action]` - optional group, nestable
//! - `/{about}` - translated literal (path definitions only)
//!
//! A parameter name ends at the first separator, bracket or `:`; a single
//! trailing `:` is consumed so `:foo:bar` reads as parameter `foo` followed
//! by literal `bar`.
//!
//! A parsed [`Pattern`] compiles to a regular expression with one named
//! group per parameter, and builds strings back from parameter values.

use std::collections::HashMap;

use crate::error::{Result, RouterError};
use crate::request::Params;

/// Alphabet a definition is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSyntax {
    /// Path definitions, `/` separated, with translated literals.
    Path,
    /// Hostname definitions, `.` separated, lower-case literals only.
    Hostname,
}

impl PatternSyntax {
    /// Character a bare parameter does not match.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Path => '/',
            Self::Hostname => '.',
        }
    }

    const fn ends_name(self, c: char) -> bool {
        matches!(c, ':' | '{' | '[' | ']') || c == self.separator()
    }

    const fn allows_literal(self, c: char) -> bool {
        match self {
            Self::Path => true,
            Self::Hostname => matches!(c, 'a'..='z' | '0'..='9' | '-' | '.'),
        }
    }
}

/// A node of a parsed definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    /// Text matched verbatim.
    Literal(String),
    /// A named parameter, optionally with its own delimiter set.
    Parameter {
        name: String,
        delimiters: Option<String>,
    },
    /// A group that may be absent.
    Optional(Vec<PatternNode>),
    /// Literal text looked up through a translator.
    TranslatedLiteral(String),
}

/// A compiled definition: regex source plus the group-to-parameter map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledPattern {
    /// Regex source, unanchored.
    pub source: String,
    /// `(group name, parameter name)` pairs in definition order.
    pub groups: Vec<(String, String)>,
}

/// A parsed route definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    definition: String,
    syntax: PatternSyntax,
    nodes: Vec<PatternNode>,
}

impl Pattern {
    /// Parses a definition.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::InvalidPattern`] for unbalanced brackets, empty
    /// parameter names, unterminated translated literals and characters the
    /// syntax does not allow.
    pub fn parse(definition: &str, syntax: PatternSyntax) -> Result<Self> {
        let mut parser = Parser {
            definition,
            syntax,
            pos: 0,
        };
        let nodes = parser.parse_sequence(0)?;
        Ok(Self {
            definition: definition.to_string(),
            syntax,
            nodes,
        })
    }

    /// Returns the definition as written.
    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }

    /// Returns the syntax the definition was parsed with.
    #[must_use]
    pub const fn syntax(&self) -> PatternSyntax {
        self.syntax
    }

    /// Returns the parsed nodes.
    #[must_use]
    pub fn nodes(&self) -> &[PatternNode] {
        &self.nodes
    }

    /// Returns true if any node, at any depth, is a translated literal.
    #[must_use]
    pub fn has_translated_literals(&self) -> bool {
        fn any(nodes: &[PatternNode]) -> bool {
            nodes.iter().any(|node| match node {
                PatternNode::TranslatedLiteral(_) => true,
                PatternNode::Optional(children) => any(children),
                _ => false,
            })
        }
        any(&self.nodes)
    }

    /// Compiles the pattern to regex source.
    ///
    /// A constraint replaces the capture body of its parameter verbatim.
    /// Translated literals are resolved through `translate` and escaped.
    pub fn compile(
        &self,
        constraints: &HashMap<String, String>,
        translate: &dyn Fn(&str) -> String,
    ) -> CompiledPattern {
        let mut compiled = CompiledPattern {
            source: String::new(),
            groups: Vec::new(),
        };
        let mut source = String::new();
        self.compile_nodes(&self.nodes, constraints, translate, &mut source, &mut compiled);
        compiled.source = source;
        compiled
    }

    fn compile_nodes(
        &self,
        nodes: &[PatternNode],
        constraints: &HashMap<String, String>,
        translate: &dyn Fn(&str) -> String,
        source: &mut String,
        compiled: &mut CompiledPattern,
    ) {
        for node in nodes {
            match node {
                PatternNode::Literal(text) => source.push_str(&regex::escape(text)),
                PatternNode::Parameter { name, delimiters } => {
                    let group = format!("param{}", compiled.groups.len() + 1);
                    let body = match (constraints.get(name), delimiters) {
                        (Some(constraint), _) => constraint.clone(),
                        (None, Some(delimiters)) => {
                            let escaped: String = delimiters
                                .chars()
                                .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
                                .collect();
                            format!("[^{escaped}]+")
                        }
                        (None, None) => {
                            format!("[^{}]+", regex::escape(&self.syntax.separator().to_string()))
                        }
                    };
                    source.push_str(&format!("(?P<{group}>{body})"));
                    compiled.groups.push((group, name.clone()));
                }
                PatternNode::Optional(children) => {
                    source.push_str("(?:");
                    self.compile_nodes(children, constraints, translate, source, compiled);
                    source.push_str(")?");
                }
                PatternNode::TranslatedLiteral(key) => {
                    source.push_str(&regex::escape(&translate(key)));
                }
            }
        }
    }

    /// Builds a string from parameter values.
    ///
    /// `params` overlay `defaults`. Returns the built string and the names of
    /// the parameters it rendered.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::MissingParameter`] when a parameter outside any
    /// optional group (or any parameter while `has_child` is set) has no
    /// value.
    pub fn build(&self, params: &Params, defaults: &Params, ctx: &BuildContext<'_>) -> Result<Built> {
        let mut merged = defaults.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut built = Built::default();
        built.text = build_nodes(&self.nodes, &merged, defaults, false, ctx, &mut built.params)?;
        Ok(built)
    }
}

/// How values are rendered while building.
pub struct BuildContext<'a> {
    /// More path follows, so optional groups may not collapse.
    pub has_child: bool,
    /// Renders a parameter value.
    pub encode: &'a dyn Fn(&str) -> String,
    /// Resolves a translated literal.
    pub translate: &'a dyn Fn(&str) -> String,
}

/// Output of [`Pattern::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Built {
    /// The built text.
    pub text: String,
    /// Names of the parameters rendered into `text`.
    pub params: Vec<String>,
}

// A group collapses to empty when a parameter in it has no value, or when
// every parameter it renders equals its default. The decision for a group is
// taken only after all of its nodes were visited.
fn build_nodes(
    nodes: &[PatternNode],
    merged: &Params,
    defaults: &Params,
    is_optional: bool,
    ctx: &BuildContext<'_>,
    used: &mut Vec<String>,
) -> Result<String> {
    let mut text = String::new();
    let mut rendered = Vec::new();
    let mut skip = true;
    let mut skippable = false;

    for node in nodes {
        match node {
            PatternNode::Literal(literal) => text.push_str(literal),
            PatternNode::Parameter { name, .. } => {
                skippable = true;
                let Some(value) = merged.get(name) else {
                    if !is_optional || ctx.has_child {
                        return Err(RouterError::MissingParameter(name.clone()));
                    }
                    return Ok(String::new());
                };
                if !is_optional || ctx.has_child || defaults.get(name) != Some(value) {
                    skip = false;
                }
                text.push_str(&(ctx.encode)(value));
                rendered.push(name.clone());
            }
            PatternNode::Optional(children) => {
                skippable = true;
                let mut nested = Vec::new();
                let part = build_nodes(children, merged, defaults, true, ctx, &mut nested)?;
                if !part.is_empty() {
                    text.push_str(&part);
                    rendered.append(&mut nested);
                    skip = false;
                }
            }
            PatternNode::TranslatedLiteral(key) => text.push_str(&(ctx.translate)(key)),
        }
    }

    if is_optional && skippable && skip {
        return Ok(String::new());
    }
    used.append(&mut rendered);
    Ok(text)
}

struct Parser<'a> {
    definition: &'a str,
    syntax: PatternSyntax,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.definition[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn error(&self, message: &str) -> RouterError {
        RouterError::pattern(self.definition, message, self.pos)
    }

    fn parse_sequence(&mut self, depth: usize) -> Result<Vec<PatternNode>> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            if !matches!(c, ':' | '{' | '[' | ']') {
                if !self.syntax.allows_literal(c) {
                    return Err(self.error("Matched hostname literal contains a disallowed character"));
                }
                literal.push(c);
                self.bump();
                continue;
            }

            if !literal.is_empty() {
                nodes.push(PatternNode::Literal(std::mem::take(&mut literal)));
            }
            self.bump();

            match c {
                ':' => nodes.push(self.parse_parameter()?),
                '{' => nodes.push(self.parse_translated_literal()?),
                '[' => nodes.push(PatternNode::Optional(self.parse_sequence(depth + 1)?)),
                _ => {
                    if depth == 0 {
                        return Err(
                            self.error("Found closing bracket without matching opening bracket")
                        );
                    }
                    return Ok(nodes);
                }
            }
        }

        if !literal.is_empty() {
            nodes.push(PatternNode::Literal(literal));
        }
        if depth > 0 {
            return Err(self.error("Found unbalanced brackets"));
        }
        Ok(nodes)
    }

    fn parse_parameter(&mut self) -> Result<PatternNode> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if self.syntax.ends_name(c) {
                break;
            }
            self.bump();
        }
        if self.pos == start {
            return Err(self.error("Found empty parameter name"));
        }
        let name = self.definition[start..self.pos].to_string();

        let mut delimiters = None;
        let rest = &self.definition[self.pos..];
        if let Some(body) = rest.strip_prefix('{') {
            if let Some(end) = body.find('}').filter(|&end| end > 0) {
                delimiters = Some(body[..end].to_string());
                self.pos += end + 2;
            }
        }
        if self.peek() == Some(':') {
            self.bump();
        }

        Ok(PatternNode::Parameter { name, delimiters })
    }

    fn parse_translated_literal(&mut self) -> Result<PatternNode> {
        if self.syntax == PatternSyntax::Hostname {
            return Err(self.error("Translated literals are not supported in hostnames"));
        }
        let rest = &self.definition[self.pos..];
        match rest.find('}') {
            Some(end) if end > 0 => {
                let key = rest[..end].to_string();
                self.pos += end + 1;
                Ok(PatternNode::TranslatedLiteral(key))
            }
            _ => Err(self.error("Translated literal missing closing bracket")),
        }
    }
}
