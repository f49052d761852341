pub mod api;
pub mod challenge;
pub mod chat;
pub mod quiz;

/// Deserialize a value that may be either a JSON number or a string containing a number.
/// HTML forms via htmx json-enc always send values as strings.
pub(crate) fn deserialize_string_or_usize<'de, D: serde::Deserializer<'de>>(
    d: D,
) -> Result<usize, D::Error> {
    struct Vis;
    impl<'de> serde::de::Visitor<'de> for Vis {
        type Value = usize;
        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("non-negative number or numeric string")
        }
        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<usize, E> {
            usize::try_from(v).map_err(E::custom)
        }
        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<usize, E> {
            usize::try_from(v).map_err(E::custom)
        }
        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<usize, E> {
            v.trim().parse().map_err(E::custom)
        }
    }
    d.deserialize_any(Vis)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Body {
        #[serde(deserialize_with = "super::deserialize_string_or_usize")]
        idx: usize,
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let n: Body = serde_json::from_str(r#"{"idx": 3}"#).unwrap();
        let s: Body = serde_json::from_str(r#"{"idx": "4"}"#).unwrap();
        assert_eq!((n.idx, s.idx), (3, 4));
        assert!(serde_json::from_str::<Body>(r#"{"idx": -1}"#).is_err());
        assert!(serde_json::from_str::<Body>(r#"{"idx": "x"}"#).is_err());
    }
}
