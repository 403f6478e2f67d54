//! Environment header format
//!
//! The flat form consumed by preprocessors: one block of four `#define`s per
//! dependency, all keyed by the same identifier.
//!
//! ```text
//! // CocoaLumberjack/Core
//! #define COCOAPODS_POD_AVAILABLE_CocoaLumberjack_Core
//! #define COCOAPODS_VERSION_MAJOR_CocoaLumberjack_Core 1
//! #define COCOAPODS_VERSION_MINOR_CocoaLumberjack_Core 9
//! #define COCOAPODS_VERSION_PATCH_CocoaLumberjack_Core 2
//! ```
//!
//! Identifiers cannot hold `/`, so the real name rides in the comment right
//! above the presence marker. Without a matching comment the identifier is
//! used as the name.

use std::fmt::Write as _;

use crate::error::RegistryError;
use crate::registry::Registry;
use crate::types::{DependencyName, DependencyRecord, Version, ident_of, parse_component};

/// Macro naming used by a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderDialect {
    prefix: String,
}

impl HeaderDialect {
    /// A dialect whose macros start with `prefix` (e.g. `COCOAPODS`).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The macro prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn available_marker(&self) -> String {
        format!("{}_POD_AVAILABLE_", self.prefix)
    }

    fn version_marker(&self, component: Component) -> String {
        format!("{}_VERSION_{}_", self.prefix, component.as_str())
    }
}

impl Default for HeaderDialect {
    fn default() -> Self {
        Self::new(crate::DEFAULT_PREFIX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Component {
    Major,
    Minor,
    Patch,
}

impl Component {
    const ALL: [Component; 3] = [Self::Major, Self::Minor, Self::Patch];

    fn as_str(self) -> &'static str {
        match self {
            Self::Major => "MAJOR",
            Self::Minor => "MINOR",
            Self::Patch => "PATCH",
        }
    }
}

/// One classified header line.
#[derive(Debug)]
enum Line<'a> {
    Blank,
    Comment(&'a str),
    Available(&'a str),
    Version(Component, &'a str, u64),
}

/// A block whose presence marker has been seen.
#[derive(Debug)]
struct OpenBlock<'a> {
    line: usize,
    ident: &'a str,
    name: DependencyName,
    parts: [Option<u64>; 3],
}

impl OpenBlock<'_> {
    fn close(self) -> Result<DependencyRecord, RegistryError> {
        match self.parts {
            [Some(major), Some(minor), Some(patch)] => Ok(DependencyRecord::new(
                self.name,
                Version::new(major, minor, patch),
            )),
            parts => {
                let missing: Vec<&str> = Component::ALL
                    .iter()
                    .zip(parts)
                    .filter(|(_, part)| part.is_none())
                    .map(|(component, _)| component.as_str())
                    .collect();
                Err(RegistryError::parse(
                    self.line,
                    format!(
                        "incomplete block for {}: missing {}",
                        self.ident,
                        missing.join(", ")
                    ),
                ))
            }
        }
    }
}

/// Parse a header using the default `COCOAPODS` dialect.
///
/// # Errors
///
/// See [`parse_with`].
pub fn parse(text: &str) -> Result<Registry, RegistryError> {
    parse_with(text, &HeaderDialect::default())
}

/// Parse a header written in `dialect`.
///
/// # Errors
///
/// Returns [`RegistryError::Parse`] for a malformed declaration, a version
/// define outside its block, a repeated or missing component, or any line
/// that is neither blank, a `//` comment, nor one of the dialect's defines.
/// Returns [`RegistryError::DuplicateName`] if a name is declared twice.
pub fn parse_with(text: &str, dialect: &HeaderDialect) -> Result<Registry, RegistryError> {
    let available = dialect.available_marker();
    let versions = Component::ALL.map(|component| (component, dialect.version_marker(component)));

    let mut records = Vec::new();
    let mut open: Option<OpenBlock<'_>> = None;
    let mut comment: Option<&str> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;

        match classify(raw, &available, &versions, line_no)? {
            Line::Blank => comment = None,
            Line::Comment(text) => comment = Some(text),
            Line::Available(ident) => {
                if let Some(block) = open.take() {
                    records.push(block.close()?);
                }
                let name = name_for(ident, comment.take())?;
                tracing::trace!("Block for {name} opens on line {line_no}");
                open = Some(OpenBlock {
                    line: line_no,
                    ident,
                    name,
                    parts: [None; 3],
                });
            }
            Line::Version(component, ident, value) => {
                comment = None;
                let block = match open.as_mut() {
                    Some(block) if block.ident == ident => block,
                    _ => {
                        return Err(RegistryError::parse(
                            line_no,
                            format!("{} version for {ident} outside its block", component.as_str()),
                        ));
                    }
                };
                let slot = &mut block.parts[component as usize];
                if slot.is_some() {
                    return Err(RegistryError::parse(
                        line_no,
                        format!("{} version for {ident} declared twice", component.as_str()),
                    ));
                }
                *slot = Some(value);
            }
        }
    }

    if let Some(block) = open.take() {
        records.push(block.close()?);
    }

    tracing::debug!("Parsed {} header blocks", records.len());
    Registry::from_records(records)
}

fn classify<'a>(
    raw: &'a str,
    available: &str,
    versions: &[(Component, String); 3],
    line_no: usize,
) -> Result<Line<'a>, RegistryError> {
    let line = raw.trim();
    if line.is_empty() {
        return Ok(Line::Blank);
    }
    if let Some(text) = line.strip_prefix("//") {
        return Ok(Line::Comment(text.trim()));
    }

    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("#define") {
        return Err(RegistryError::parse(line_no, format!("unexpected line: {line}")));
    }
    let Some(macro_name) = tokens.next() else {
        return Err(RegistryError::parse(line_no, "#define without a macro name"));
    };
    let rest: Vec<&str> = tokens.collect();

    if let Some(ident) = macro_name.strip_prefix(available) {
        check_ident(ident, line_no)?;
        if !rest.is_empty() {
            return Err(RegistryError::parse(
                line_no,
                format!("presence marker for {ident} takes no value"),
            ));
        }
        return Ok(Line::Available(ident));
    }

    for (component, marker) in versions {
        if let Some(ident) = macro_name.strip_prefix(marker.as_str()) {
            check_ident(ident, line_no)?;
            let value = match rest.as_slice() {
                [value] => parse_component(value).ok_or_else(|| {
                    RegistryError::parse(
                        line_no,
                        format!("non-integer {} version for {ident}: {value}", component.as_str()),
                    )
                })?,
                [] => {
                    return Err(RegistryError::parse(
                        line_no,
                        format!("missing {} version for {ident}", component.as_str()),
                    ));
                }
                _ => {
                    return Err(RegistryError::parse(
                        line_no,
                        format!("trailing tokens after {} version for {ident}", component.as_str()),
                    ));
                }
            };
            return Ok(Line::Version(*component, ident, value));
        }
    }

    Err(RegistryError::parse(line_no, format!("unrecognised macro {macro_name}")))
}

fn check_ident(ident: &str, line_no: usize) -> Result<(), RegistryError> {
    if ident.is_empty() {
        return Err(RegistryError::parse(line_no, "missing dependency name"));
    }
    if !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(RegistryError::parse(
            line_no,
            format!("invalid identifier {ident}"),
        ));
    }
    Ok(())
}

/// Prefer the comment's spelling when it folds to the marker's identifier.
fn name_for(ident: &str, comment: Option<&str>) -> Result<DependencyName, RegistryError> {
    if let Some(text) = comment {
        if ident_of(text) == ident {
            if let Ok(name) = DependencyName::new(text) {
                return Ok(name);
            }
        }
    }
    DependencyName::new(ident)
}

/// Render a registry using the default `COCOAPODS` dialect.
pub fn render(registry: &Registry) -> String {
    render_with(registry, &HeaderDialect::default())
}

/// Render a registry as a header in `dialect`, one block per record in
/// declaration order.
pub fn render_with(registry: &Registry, dialect: &HeaderDialect) -> String {
    let prefix = dialect.prefix();
    let mut out = String::new();

    out.push_str("// Generated by depenv. Do not edit.\n");
    out.push_str("//\n");
    let _ = writeln!(
        out,
        "// Test `{prefix}_POD_AVAILABLE_<name>` to check whether a dependency"
    );
    let _ = writeln!(
        out,
        "// is present; `{prefix}_VERSION_MAJOR_<name>` and friends hold its version."
    );

    for record in registry {
        let ident = record.name.ident();
        let Version {
            major,
            minor,
            patch,
        } = record.version;

        out.push('\n');
        let _ = writeln!(out, "// {}", record.name);
        let _ = writeln!(out, "#define {}{ident}", dialect.available_marker());
        let _ = writeln!(out, "#define {}{ident} {major}", dialect.version_marker(Component::Major));
        let _ = writeln!(out, "#define {}{ident} {minor}", dialect.version_marker(Component::Minor));
        let _ = writeln!(out, "#define {}{ident} {patch}", dialect.version_marker(Component::Patch));
    }

    out
}
