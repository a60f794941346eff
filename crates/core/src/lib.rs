#![forbid(unsafe_code)]

pub mod chain;

pub mod ids {
    /// Identifier of one owner partition. Every ordering invariant is scoped
    /// to a single partition; tabs of different owners never interact.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct OwnerId(String);

    impl OwnerId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, OwnerIdError> {
            let value = value.into();
            validate_owner_id(&value)?;
            Ok(Self(value))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum OwnerIdError {
        Empty,
        TooLong,
        InvalidFirstChar,
        InvalidChar { ch: char, index: usize },
    }

    impl OwnerIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "owner id must not be empty",
                Self::TooLong => "owner id is too long",
                Self::InvalidFirstChar => "owner id must start with an alphanumeric character",
                Self::InvalidChar { .. } => "owner id contains an invalid character",
            }
        }
    }

    fn validate_owner_id(value: &str) -> Result<(), OwnerIdError> {
        if value.is_empty() {
            return Err(OwnerIdError::Empty);
        }
        if value.len() > 128 {
            return Err(OwnerIdError::TooLong);
        }
        let mut chars = value.chars();
        let Some(first) = chars.next() else {
            return Err(OwnerIdError::Empty);
        };
        if !first.is_ascii_alphanumeric() {
            return Err(OwnerIdError::InvalidFirstChar);
        }
        for (index, ch) in value.chars().enumerate() {
            if index == 0 {
                continue;
            }
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                continue;
            }
            return Err(OwnerIdError::InvalidChar { ch, index });
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn owner_id_validation() {
            assert_eq!(OwnerId::try_new("").unwrap_err(), OwnerIdError::Empty);
            assert_eq!(
                OwnerId::try_new("a".repeat(129)).unwrap_err(),
                OwnerIdError::TooLong
            );
            assert_eq!(
                OwnerId::try_new("_user").unwrap_err(),
                OwnerIdError::InvalidFirstChar
            );
            assert_eq!(
                OwnerId::try_new("user one").unwrap_err(),
                OwnerIdError::InvalidChar { ch: ' ', index: 4 }
            );
            assert!(OwnerId::try_new("user_123").is_ok());
            assert!(OwnerId::try_new("u.alpha-7").is_ok());
        }
    }
}

pub mod model {
    pub const MAX_TITLE_LEN: usize = 512;
    pub const MAX_KIND_LEN: usize = 64;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum TitleError {
        Empty,
        TooLong,
    }

    impl TitleError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "title must not be empty",
                Self::TooLong => "title is too long",
            }
        }
    }

    pub fn validate_title(value: &str) -> Result<(), TitleError> {
        if value.trim().is_empty() {
            return Err(TitleError::Empty);
        }
        if value.len() > MAX_TITLE_LEN {
            return Err(TitleError::TooLong);
        }
        Ok(())
    }

    /// Kinds are an open-ended category tag ("note", "projects", ...), set at
    /// creation and immutable afterwards.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum KindError {
        Empty,
        TooLong,
        InvalidChar,
    }

    impl KindError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "kind must not be empty",
                Self::TooLong => "kind is too long",
                Self::InvalidChar => "kind contains an invalid character",
            }
        }
    }

    pub fn validate_kind(value: &str) -> Result<(), KindError> {
        if value.is_empty() {
            return Err(KindError::Empty);
        }
        if value.len() > MAX_KIND_LEN {
            return Err(KindError::TooLong);
        }
        if !value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
        {
            return Err(KindError::InvalidChar);
        }
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn title_validation() {
            assert_eq!(validate_title("").unwrap_err(), TitleError::Empty);
            assert_eq!(validate_title("   ").unwrap_err(), TitleError::Empty);
            assert_eq!(
                validate_title(&"x".repeat(MAX_TITLE_LEN + 1)).unwrap_err(),
                TitleError::TooLong
            );
            assert!(validate_title("My Important Tab").is_ok());
        }

        #[test]
        fn kind_validation() {
            assert_eq!(validate_kind("").unwrap_err(), KindError::Empty);
            assert_eq!(
                validate_kind(&"k".repeat(MAX_KIND_LEN + 1)).unwrap_err(),
                KindError::TooLong
            );
            assert_eq!(validate_kind("bad kind").unwrap_err(), KindError::InvalidChar);
            assert!(validate_kind("note").is_ok());
            assert!(validate_kind("projects").is_ok());
        }
    }
}
