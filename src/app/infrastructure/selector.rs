//! Minimal CSS selector engine used by the in-memory document.
//!
//! Supports what the site markup needs: type selectors, `.class`,
//! `[attr]` presence, the descendant and child (`>`) combinators, and
//! comma-separated selector lists. Anything else fails to parse and the
//! query returns nothing, matching how an invalid selector behaves in a
//! browser (no match, no panic).

/// Read-only view of a node tree that a selector can be matched against.
pub trait SelectorTree {
    fn tag(&self, node: usize) -> &str;
    fn has_class(&self, node: usize, class: &str) -> bool;
    fn has_attribute(&self, node: usize, name: &str) -> bool;
    fn parent(&self, node: usize) -> Option<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    attributes: Vec<String>,
}

impl Compound {
    fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, node: usize) -> bool {
        if let Some(tag) = &self.tag
            && !tree.tag(node).eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.classes.iter().all(|c| tree.has_class(node, c))
            && self.attributes.iter().all(|a| tree.has_attribute(node, a))
    }
}

/// One complex selector: compounds joined by combinators, stored
/// right-to-left so matching starts at the subject element.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Complex {
    subject: Compound,
    ancestors: Vec<(Combinator, Compound)>,
}

impl Complex {
    fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, node: usize) -> bool {
        self.subject.matches(tree, node) && Self::match_from(tree, node, &self.ancestors)
    }

    fn match_from<T: SelectorTree + ?Sized>(
        tree: &T,
        node: usize,
        rest: &[(Combinator, Compound)],
    ) -> bool {
        let Some(((combinator, compound), tail)) = rest.split_first() else {
            return true;
        };
        match combinator {
            Combinator::Child => match tree.parent(node) {
                Some(parent) => {
                    compound.matches(tree, parent) && Self::match_from(tree, parent, tail)
                }
                None => false,
            },
            Combinator::Descendant => {
                let mut cursor = tree.parent(node);
                while let Some(ancestor) = cursor {
                    if compound.matches(tree, ancestor) && Self::match_from(tree, ancestor, tail) {
                        return true;
                    }
                    cursor = tree.parent(ancestor);
                }
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    alternatives: Vec<Complex>,
}

impl SelectorList {
    pub fn parse(input: &str) -> Option<Self> {
        let alternatives = input
            .split(',')
            .map(parse_complex)
            .collect::<Option<Vec<_>>>()?;
        if alternatives.is_empty() {
            return None;
        }
        Some(Self { alternatives })
    }

    pub fn matches<T: SelectorTree + ?Sized>(&self, tree: &T, node: usize) -> bool {
        self.alternatives.iter().any(|c| c.matches(tree, node))
    }
}

fn parse_complex(input: &str) -> Option<Complex> {
    // Pad `>` so it tokenizes as its own word.
    let spaced = input.replace('>', " > ");
    let mut compounds: Vec<(Combinator, Compound)> = Vec::new();
    let mut pending = Combinator::Descendant;
    let mut saw_child = false;

    for token in spaced.split_whitespace() {
        if token == ">" {
            if compounds.is_empty() || saw_child {
                return None;
            }
            pending = Combinator::Child;
            saw_child = true;
            continue;
        }
        compounds.push((pending, parse_compound(token)?));
        pending = Combinator::Descendant;
        saw_child = false;
    }
    if saw_child {
        return None;
    }

    let (mut link, subject) = compounds.pop()?;
    // Each compound carries the combinator on its left; the ancestor chain
    // needs the one on its right, so shift by one while reversing.
    let mut ancestors = Vec::with_capacity(compounds.len());
    while let Some((combinator, compound)) = compounds.pop() {
        ancestors.push((link, compound));
        link = combinator;
    }
    Some(Complex { subject, ancestors })
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut chars = token.char_indices().peekable();
    let mut tag = String::new();

    while let Some(&(_, c)) = chars.peek() {
        if c == '.' || c == '[' {
            break;
        }
        if !is_ident_char(c) {
            return None;
        }
        tag.push(c);
        chars.next();
    }
    if !tag.is_empty() && tag != "*" {
        compound.tag = Some(tag);
    }

    while let Some((_, c)) = chars.next() {
        match c {
            '.' => {
                let mut class = String::new();
                while let Some(&(_, n)) = chars.peek() {
                    if n == '.' || n == '[' {
                        break;
                    }
                    if !is_ident_char(n) {
                        return None;
                    }
                    class.push(n);
                    chars.next();
                }
                if class.is_empty() {
                    return None;
                }
                compound.classes.push(class);
            }
            '[' => {
                let mut name = String::new();
                let mut closed = false;
                for (_, n) in chars.by_ref() {
                    if n == ']' {
                        closed = true;
                        break;
                    }
                    if !is_ident_char(n) {
                        return None;
                    }
                    name.push(n);
                }
                if !closed || name.is_empty() {
                    return None;
                }
                compound.attributes.push(name.to_ascii_lowercase());
            }
            _ => return None,
        }
    }
    Some(compound)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '*'
}
