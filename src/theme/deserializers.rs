use gpui::{AbsoluteLength, DefiniteLength, Pixels, SharedString, px, rems};
use serde::{Deserialize, Deserializer, de::Error};
use smallvec::SmallVec;

/// A length as written in a theme file: `12`, `"12px"`, `"0.875rem"` or `"150%"`.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LengthToken {
    Pixels(f32),
    Rems(f32),
    Percent(f32),
}

impl LengthToken {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();

        if let Some(value) = raw.strip_suffix("px") {
            return value.trim().parse().ok().map(Self::Pixels);
        }
        if let Some(value) = raw.strip_suffix("rem") {
            return value.trim().parse().ok().map(Self::Rems);
        }
        if let Some(value) = raw.strip_suffix('%') {
            return value.trim().parse().ok().map(Self::Percent);
        }

        None
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLength {
    Number(f32),
    Text(String),
}

impl RawLength {
    fn into_token<E: Error>(self) -> Result<LengthToken, E> {
        match self {
            RawLength::Number(value) => Ok(LengthToken::Pixels(value)),
            RawLength::Text(text) => LengthToken::parse(&text)
                .ok_or_else(|| E::custom(format!("\"{text}\" is not a valid length"))),
        }
    }
}

pub fn de_string_or_non_empty_list<'de, D>(
    deserializer: D,
) -> Result<SmallVec<[SharedString; 1]>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(SharedString),
        Many(SmallVec<[SharedString; 1]>),
    }

    match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(family) => Ok(SmallVec::from_buf([family])),
        OneOrMany::Many(families) if families.is_empty() => {
            Err(D::Error::custom("font family list can't be empty"))
        }
        OneOrMany::Many(families) => Ok(families),
    }
}

pub fn de_pixels<'de, D>(deserializer: D) -> Result<Pixels, D::Error>
where
    D: Deserializer<'de>,
{
    match RawLength::deserialize(deserializer)?.into_token()? {
        LengthToken::Pixels(value) => Ok(px(value)),
        other => Err(D::Error::custom(format!(
            "expected a pixel length, found {other:?}"
        ))),
    }
}

pub fn de_abs_length<'de, D>(deserializer: D) -> Result<AbsoluteLength, D::Error>
where
    D: Deserializer<'de>,
{
    match RawLength::deserialize(deserializer)?.into_token()? {
        LengthToken::Pixels(value) => Ok(AbsoluteLength::Pixels(px(value))),
        LengthToken::Rems(value) => Ok(AbsoluteLength::Rems(rems(value))),
        LengthToken::Percent(_) => Err(D::Error::custom(
            "percentages are not allowed for absolute lengths",
        )),
    }
}

pub fn de_def_length<'de, D>(deserializer: D) -> Result<DefiniteLength, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawLength::deserialize(deserializer)?.into_token()? {
        LengthToken::Pixels(value) => DefiniteLength::Absolute(AbsoluteLength::Pixels(px(value))),
        LengthToken::Rems(value) => DefiniteLength::Absolute(AbsoluteLength::Rems(rems(value))),
        LengthToken::Percent(value) => DefiniteLength::Fraction(value / 100.),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Lengths {
        #[serde(deserialize_with = "de_pixels")]
        pixels: Pixels,
        #[serde(deserialize_with = "de_abs_length")]
        absolute: AbsoluteLength,
        #[serde(deserialize_with = "de_def_length")]
        definite: DefiniteLength,
    }

    #[test]
    fn parses_length_tokens() {
        assert_eq!(LengthToken::parse("12px"), Some(LengthToken::Pixels(12.)));
        assert_eq!(LengthToken::parse(" 1.5rem "), Some(LengthToken::Rems(1.5)));
        assert_eq!(LengthToken::parse("150%"), Some(LengthToken::Percent(150.)));
        assert_eq!(LengthToken::parse("12"), None);
        assert_eq!(LengthToken::parse("wide"), None);
    }

    #[test]
    fn deserializes_mixed_lengths() {
        let lengths: Lengths =
            serde_json::from_str(r#"{ "pixels": 4, "absolute": "1rem", "definite": "150%" }"#)
                .expect("valid lengths");

        assert_eq!(lengths.pixels, px(4.));
        assert!(matches!(lengths.absolute, AbsoluteLength::Rems(_)));
        assert!(matches!(
            lengths.definite,
            DefiniteLength::Fraction(f) if (f - 1.5).abs() < f32::EPSILON
        ));
    }

    #[test]
    fn rejects_relative_units_for_pixels() {
        let result: Result<Lengths, _> =
            serde_json::from_str(r#"{ "pixels": "2rem", "absolute": "1rem", "definite": "1px" }"#);
        assert!(result.is_err());
    }
}
