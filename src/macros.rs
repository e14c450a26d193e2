#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! outcome {
    (positive) => {
        $crate::Outcome::Label($crate::Sentiment::Positive)
    };
    (neutral) => {
        $crate::Outcome::Label($crate::Sentiment::Neutral)
    };
    (negative) => {
        $crate::Outcome::Label($crate::Sentiment::Negative)
    };
    (oracle) => {
        $crate::Outcome::FollowOracle
    };
}

#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        when: |$ev:ident| $pred:expr,
        then: $then:ident
        $(,)?
    ) => {{
        $crate::Rule {
            name: $name,
            when: |$ev: &$crate::Evidence| -> bool { $pred },
            then: $crate::outcome!($then),
        }
    }};
}
