pub use self::glob::SourcePattern;

pub mod glob {
    use std::{fmt, ops::Deref};

    use ::glob::PatternError;
    use ::serde::{Deserialize, Serialize};

    /// Filename glob used to pick a submission's source file. Defaults to `*.c`.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(try_from = "String", into = "String")]
    pub struct SourcePattern(::glob::Pattern);

    impl SourcePattern {
        pub const DEFAULT: &str = "*.c";

        pub fn parse(pattern: &str) -> Result<Self, PatternError> {
            ::glob::Pattern::new(pattern).map(Self)
        }
    }

    impl Default for SourcePattern {
        fn default() -> Self {
            Self::parse(Self::DEFAULT).unwrap_or_else(|e| unreachable!("{}", e))
        }
    }

    impl Deref for SourcePattern {
        type Target = ::glob::Pattern;

        fn deref(&self) -> &Self::Target {
            &self.0
        }
    }

    impl fmt::Display for SourcePattern {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(self.0.as_str())
        }
    }

    impl TryFrom<String> for SourcePattern {
        type Error = PatternError;

        fn try_from(value: String) -> Result<Self, Self::Error> {
            Self::parse(&value)
        }
    }

    impl From<SourcePattern> for String {
        fn from(value: SourcePattern) -> Self {
            value.0.as_str().to_owned()
        }
    }

}
