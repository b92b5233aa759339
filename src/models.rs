//! Core data models for doccov
//!
//! These models are used throughout the codebase for representing
//! declared members, coverage counts, and the final analysis result.

/// Kind of a declared member, as reported by the source parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
    Delegate,
    Event,
    Field,
    Property,
    Method,
}

/// Declared accessibility of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Protected,
    /// `protected internal` - accessible to derived types outside the assembly.
    ProtectedInternal,
    /// `private protected` - derived types within the assembly only.
    PrivateProtected,
    Internal,
    Private,
}

impl Accessibility {
    /// Whether the member is part of the public API surface: visible outside
    /// the assembly or to derived types outside it.
    pub fn is_api(&self) -> bool {
        matches!(
            self,
            Accessibility::Public | Accessibility::Protected | Accessibility::ProtectedInternal
        )
    }
}

/// One declared member found in a source file. Ephemeral: produced by the
/// parser and consumed within file analysis, never persisted.
#[derive(Debug, Clone)]
pub struct MemberRecord {
    pub kind: MemberKind,
    pub accessibility: Accessibility,
    pub has_documentation: bool,
}

/// Per-file coverage counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileAnalysisResult {
    pub public_member_count: usize,
    pub undocumented_count: usize,
}

/// Running coverage totals across all files of all selected projects.
///
/// Only grows during an analysis run; immutable once analysis completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateResult {
    pub total: usize,
    pub undocumented: usize,
}

impl AggregateResult {
    /// Fold one file's counts into the running totals. Purely additive;
    /// this is the only mutation path.
    pub fn fold(mut self, next: &FileAnalysisResult) -> Self {
        self.total += next.public_member_count;
        self.undocumented += next.undocumented_count;
        self
    }

    pub fn documented(&self) -> usize {
        self.total - self.undocumented
    }

    /// Documented fraction in `[0, 1]`, or `None` when nothing was analyzed.
    pub fn documented_percentage(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.documented() as f64 / self.total as f64)
        }
    }

    /// Rounded whole-number percentage for display; 0 when nothing was analyzed.
    pub fn documented_percentage_display(&self) -> u32 {
        self.documented_percentage()
            .map(|p| (p * 100.0).round() as u32)
            .unwrap_or(0)
    }
}

/// Tri-state health classification, ordered by severity:
/// `Error > Warning > Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthIndicator {
    Success,
    Warning,
    Error,
}

impl std::fmt::Display for HealthIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthIndicator::Success => write!(f, "success"),
            HealthIndicator::Warning => write!(f, "warning"),
            HealthIndicator::Error => write!(f, "error"),
        }
    }
}

/// The single terminal artifact of a run, handed to the reporter.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub aggregate: AggregateResult,
    pub health: HealthIndicator,
    pub message: String,
}

impl CommandResult {
    pub fn new(aggregate: AggregateResult, health: HealthIndicator, message: String) -> Self {
        Self {
            aggregate,
            health,
            message,
        }
    }

    /// shields.io badge URL encoding the coverage percentage and severity color.
    pub fn badge_url(&self) -> String {
        let pct = self.aggregate.documented_percentage_display();
        let color = match self.health {
            HealthIndicator::Error => "red",
            HealthIndicator::Warning => "yellow",
            HealthIndicator::Success => "brightgreen",
        };
        format!("https://img.shields.io/badge/Documentation%20Coverage-{pct}%25-{color}")
    }

    pub fn health_glyph(&self) -> &'static str {
        match self.health {
            HealthIndicator::Error => "\u{274c}",
            HealthIndicator::Warning => "\u{26a0}\u{fe0f}",
            HealthIndicator::Success => "\u{2705}",
        }
    }
}

/// Optional source-location attributes attached to a log event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub col: Option<u32>,
    pub end_line: Option<u32>,
    pub end_column: Option<u32>,
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aggregate(total: usize, undocumented: usize) -> AggregateResult {
        AggregateResult { total, undocumented }
    }

    #[test]
    fn fold_is_additive() {
        let a = AggregateResult::default()
            .fold(&FileAnalysisResult {
                public_member_count: 4,
                undocumented_count: 1,
            })
            .fold(&FileAnalysisResult {
                public_member_count: 6,
                undocumented_count: 2,
            });
        assert_eq!(a, aggregate(10, 3));
        assert_eq!(a.documented(), 7);
    }

    #[test]
    fn percentage_bounds() {
        for (total, undocumented) in [(1, 0), (1, 1), (10, 3), (100, 99)] {
            let a = aggregate(total, undocumented);
            assert!(a.documented() <= a.total);
            let display = a.documented_percentage_display();
            assert!(display <= 100, "display {display} out of range");
        }
    }

    #[test]
    fn percentage_undefined_when_empty() {
        let a = AggregateResult::default();
        assert_eq!(a.documented_percentage(), None);
        assert_eq!(a.documented_percentage_display(), 0);
    }

    #[test]
    fn percentage_display_rounds() {
        // 2/3 documented -> 66.67% -> 67
        assert_eq!(aggregate(3, 1).documented_percentage_display(), 67);
        assert_eq!(aggregate(10, 3).documented_percentage_display(), 70);
    }

    #[test]
    fn health_severity_order() {
        assert!(HealthIndicator::Error > HealthIndicator::Warning);
        assert!(HealthIndicator::Warning > HealthIndicator::Success);
    }

    #[test]
    fn badge_url_encodes_percent_and_color() {
        let result = CommandResult::new(aggregate(10, 3), HealthIndicator::Warning, "m".into());
        assert_eq!(
            result.badge_url(),
            "https://img.shields.io/badge/Documentation%20Coverage-70%25-yellow"
        );
        let result = CommandResult::new(aggregate(10, 0), HealthIndicator::Success, "m".into());
        assert!(result.badge_url().ends_with("100%25-brightgreen"));
        assert_eq!(result.health_glyph(), "\u{2705}");
    }

    #[test]
    fn accessibility_api_surface() {
        assert!(Accessibility::Public.is_api());
        assert!(Accessibility::Protected.is_api());
        assert!(Accessibility::ProtectedInternal.is_api());
        assert!(!Accessibility::PrivateProtected.is_api());
        assert!(!Accessibility::Internal.is_api());
        assert!(!Accessibility::Private.is_api());
    }
}
