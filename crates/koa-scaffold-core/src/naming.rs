//! Project name validation and suggestion
//!
//! Names follow the npm package-name rules: lowercase recommended, a
//! restricted character set, length-limited, and a handful of reserved
//! names (npm artifacts plus Windows device names). Validation collects
//! every violated rule instead of stopping at the first one, so the CLI
//! can report them all at once.

use std::fmt;

/// Longest name npm accepts
const MAX_NAME_LENGTH: usize = 214;

/// Name used when a suggestion collapses to nothing
const FALLBACK_NAME: &str = "my-koa-app";

/// Prefix applied when a suggestion would start with a digit
const DIGIT_PREFIX: &str = "app-";

/// Names that can never be used as a project name
const RESERVED_NAMES: &[&str] = &[
    "node_modules",
    "package.json",
    "package-lock.json",
    "favicon.ico",
    ".git",
    "con",
    "prn",
    "aux",
    "nul",
    "com1",
    "com2",
    "com3",
    "com4",
    "com5",
    "com6",
    "com7",
    "com8",
    "com9",
    "lpt1",
    "lpt2",
    "lpt3",
    "lpt4",
    "lpt5",
    "lpt6",
    "lpt7",
    "lpt8",
    "lpt9",
];

/// Machine-readable code for a single name rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameIssueCode {
    EmptyName,
    NameTooLong,
    NameTooShort,
    InvalidCharacters,
    InvalidStart,
    InvalidEnd,
    ReservedName,
    InvalidScopeFormat,
    ConsecutiveSeparators,
    UppercaseWarning,
}

impl fmt::Display for NameIssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            NameIssueCode::EmptyName => "EMPTY_NAME",
            NameIssueCode::NameTooLong => "NAME_TOO_LONG",
            NameIssueCode::NameTooShort => "NAME_TOO_SHORT",
            NameIssueCode::InvalidCharacters => "INVALID_CHARACTERS",
            NameIssueCode::InvalidStart => "INVALID_START",
            NameIssueCode::InvalidEnd => "INVALID_END",
            NameIssueCode::ReservedName => "RESERVED_NAME",
            NameIssueCode::InvalidScopeFormat => "INVALID_SCOPE_FORMAT",
            NameIssueCode::ConsecutiveSeparators => "CONSECUTIVE_SEPARATORS",
            NameIssueCode::UppercaseWarning => "UPPERCASE_WARNING",
        };
        write!(f, "{code}")
    }
}

/// One violated (or advisory) name rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameIssue {
    pub code: NameIssueCode,
    pub message: String,
}

impl NameIssue {
    fn new(code: NameIssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Outcome of validating a project name
///
/// Warnings never affect `valid`; a name is valid iff `errors` is empty.
#[derive(Debug, Clone, Default)]
pub struct NameValidation {
    pub valid: bool,
    pub errors: Vec<NameIssue>,
    pub warnings: Vec<NameIssue>,
}

impl NameValidation {
    pub fn has_code(&self, code: NameIssueCode) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|i| i.code == code)
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | '-')
}

/// Check a scoped name against the `@scope/name` shape
fn is_valid_scope_format(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('@') else {
        return false;
    };
    let Some((scope, pkg)) = rest.split_once('/') else {
        return false;
    };
    !scope.is_empty()
        && !pkg.is_empty()
        && !pkg.contains('/')
        && scope.chars().all(is_name_char)
        && pkg.chars().all(is_name_char)
}

/// Validate a project name against the full rule set
///
/// Every rule is checked independently and every violation is collected;
/// only an empty name short-circuits, since nothing else is meaningful to
/// check against an empty string.
pub fn validate_project_name(name: &str) -> NameValidation {
    let mut result = NameValidation::default();

    if name.trim().is_empty() {
        result.errors.push(NameIssue::new(
            NameIssueCode::EmptyName,
            "project name cannot be empty",
        ));
        return result;
    }

    if name.len() > MAX_NAME_LENGTH {
        result.errors.push(NameIssue::new(
            NameIssueCode::NameTooLong,
            format!(
                "project name is {} characters long (maximum is {MAX_NAME_LENGTH})",
                name.len()
            ),
        ));
    }

    // Unreachable after the empty check, kept so the rule set stays complete
    if name.is_empty() {
        result.errors.push(NameIssue::new(
            NameIssueCode::NameTooShort,
            "project name must be at least 1 character long",
        ));
    }

    let scoped = name.starts_with('@');
    let mut slashes_seen = 0usize;
    let mut bad_chars: Vec<char> = Vec::new();
    for (i, c) in name.chars().enumerate() {
        // A scoped name gets its leading '@' and one '/' for free; the
        // scope-format rule below owns the overall @scope/name shape.
        if scoped && i == 0 {
            continue;
        }
        if scoped && c == '/' && slashes_seen == 0 {
            slashes_seen = 1;
            continue;
        }
        if !is_name_char(c) && !bad_chars.contains(&c) {
            bad_chars.push(c);
        }
    }
    if !bad_chars.is_empty() {
        let listed: String = bad_chars
            .iter()
            .map(|c| format!("'{c}'"))
            .collect::<Vec<_>>()
            .join(", ");
        result.errors.push(NameIssue::new(
            NameIssueCode::InvalidCharacters,
            format!("project name contains invalid characters: {listed} (allowed: a-z, A-Z, 0-9, '.', '_', '-')"),
        ));
    }

    if name.starts_with('.') || name.starts_with('_') {
        result.errors.push(NameIssue::new(
            NameIssueCode::InvalidStart,
            "project name cannot start with '.' or '_'",
        ));
    }

    if name.ends_with('.') || name.ends_with('-') {
        result.errors.push(NameIssue::new(
            NameIssueCode::InvalidEnd,
            "project name cannot end with '.' or '-'",
        ));
    }

    if RESERVED_NAMES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(name))
    {
        result.errors.push(NameIssue::new(
            NameIssueCode::ReservedName,
            format!("'{name}' is a reserved name"),
        ));
    }

    if scoped && !is_valid_scope_format(name) {
        result.errors.push(NameIssue::new(
            NameIssueCode::InvalidScopeFormat,
            "scoped names must match '@scope/name'",
        ));
    }

    let chars: Vec<char> = name.chars().collect();
    if chars
        .windows(2)
        .any(|w| is_separator(w[0]) && is_separator(w[1]))
    {
        result.errors.push(NameIssue::new(
            NameIssueCode::ConsecutiveSeparators,
            "project name cannot contain consecutive '.' or '-' characters",
        ));
    }

    if name.chars().any(|c| c.is_ascii_uppercase()) {
        result.warnings.push(NameIssue::new(
            NameIssueCode::UppercaseWarning,
            "npm package names are conventionally lowercase",
        ));
    }

    result.valid = result.errors.is_empty();
    result
}

/// Derive a valid name from an invalid one
///
/// Pure and deterministic: lowercase, map disallowed characters to '-',
/// collapse separator runs, trim the edges, and guard the empty and
/// leading-digit cases.
pub fn suggest_valid_name(name: &str) -> String {
    let lowered = name.to_lowercase();

    let replaced: String = lowered
        .chars()
        .map(|c| if is_name_char(c) { c } else { '-' })
        .collect();

    // Runs of two or more '.', '_' or '-' become a single '-'
    let mut collapsed = String::with_capacity(replaced.len());
    let mut run = 0usize;
    for c in replaced.chars() {
        if matches!(c, '.' | '_' | '-') {
            run += 1;
        } else {
            if run >= 2 {
                collapsed.pop();
                collapsed.push('-');
            }
            run = 0;
        }
        if run >= 2 {
            continue;
        }
        collapsed.push(c);
    }
    if run >= 2 {
        collapsed.pop();
        collapsed.push('-');
    }

    let trimmed = collapsed
        .trim_start_matches(['.', '_'])
        .trim_end_matches(['.', '-']);

    if trimmed.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("{DIGIT_PREFIX}{trimmed}");
    }

    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_valid_names() {
        for name in ["my-app", "koa-server", "app2", "a", "my.app", "my_app"] {
            let result = validate_project_name(name);
            assert!(result.valid, "expected '{name}' to be valid: {result:?}");
            assert!(result.warnings.is_empty());
        }
    }

    #[test]
    fn test_empty_name_short_circuits() {
        let result = validate_project_name("   ");
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].code, NameIssueCode::EmptyName);
    }

    #[test]
    fn test_uppercase_is_warning_only() {
        let result = validate_project_name("My-App");
        assert!(result.valid);
        assert!(result.has_code(NameIssueCode::UppercaseWarning));
    }

    #[test]
    fn test_reserved_names() {
        let result = validate_project_name("node_modules");
        assert!(!result.valid);
        assert!(result.has_code(NameIssueCode::ReservedName));

        // Case-insensitive
        let result = validate_project_name("CON");
        assert!(!result.valid);
        assert!(result.has_code(NameIssueCode::ReservedName));
    }

    #[test]
    fn test_invalid_start_and_end() {
        let result = validate_project_name(".foo");
        assert!(result.has_code(NameIssueCode::InvalidStart));

        let result = validate_project_name("_foo");
        assert!(result.has_code(NameIssueCode::InvalidStart));

        let result = validate_project_name("foo-");
        assert!(result.has_code(NameIssueCode::InvalidEnd));

        let result = validate_project_name("foo.");
        assert!(result.has_code(NameIssueCode::InvalidEnd));
    }

    #[test]
    fn test_invalid_characters() {
        let result = validate_project_name("my app!");
        assert!(!result.valid);
        assert!(result.has_code(NameIssueCode::InvalidCharacters));
        let issue = result
            .errors
            .iter()
            .find(|i| i.code == NameIssueCode::InvalidCharacters)
            .unwrap();
        assert!(issue.message.contains("'!'"));
    }

    #[test]
    fn test_too_long() {
        let name = "a".repeat(215);
        let result = validate_project_name(&name);
        assert!(result.has_code(NameIssueCode::NameTooLong));
    }

    #[test]
    fn test_consecutive_separators() {
        for name in ["a--b", "a..b", "a.-b"] {
            let result = validate_project_name(name);
            assert!(
                result.has_code(NameIssueCode::ConsecutiveSeparators),
                "expected '{name}' to flag consecutive separators"
            );
        }
    }

    #[test]
    fn test_scoped_names() {
        assert!(validate_project_name("@scope/name").valid);
        assert!(validate_project_name("@my.scope/my_pkg").valid);

        let result = validate_project_name("@scope");
        assert!(result.has_code(NameIssueCode::InvalidScopeFormat));

        let result = validate_project_name("@/name");
        assert!(result.has_code(NameIssueCode::InvalidScopeFormat));

        let result = validate_project_name("@a/b/c");
        assert!(result.has_code(NameIssueCode::InvalidScopeFormat));
    }

    #[test]
    fn test_rule_collection_does_not_short_circuit() {
        let result = validate_project_name(".bad name-");
        assert!(result.has_code(NameIssueCode::InvalidStart));
        assert!(result.has_code(NameIssueCode::InvalidEnd));
        assert!(result.has_code(NameIssueCode::InvalidCharacters));
    }

    #[test]
    fn test_suggest_collapses_and_lowers() {
        assert_eq!(suggest_valid_name("My--App!"), "my-app");
    }

    #[test]
    fn test_suggest_strips_edges() {
        assert_eq!(suggest_valid_name("_private"), "private");
        assert_eq!(suggest_valid_name(".hidden."), "hidden");
    }

    #[test]
    fn test_suggest_fallback_and_digit_prefix() {
        assert_eq!(suggest_valid_name("..."), FALLBACK_NAME);
        assert_eq!(suggest_valid_name("!!!"), FALLBACK_NAME);
        assert_eq!(suggest_valid_name("9lives"), "app-9lives");
    }

    #[test]
    fn test_suggest_is_idempotent_on_valid_output() {
        let suggested = suggest_valid_name("My--App!");
        assert!(validate_project_name(&suggested).valid);
        assert_eq!(suggest_valid_name(&suggested), suggested);
    }
}
