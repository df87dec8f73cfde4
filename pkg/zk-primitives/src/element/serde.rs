use ethnum::U256;
use serde::{Deserialize, Deserializer, Serializer};

pub(super) fn serialize<S>(u: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    hex::serde::serialize(u.to_be_bytes(), serializer)
}

/// Accepts full 32-byte hex as well as short forms like `0x2a`, which are common in config files
pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    let s = s.trim_start_matches("0x");

    if s.len() > 64 {
        return Err(serde::de::Error::custom("Invalid length"));
    }

    let padded = format!("{s:0>64}");
    let vec = hex::decode(padded).map_err(serde::de::Error::custom)?;
    let bytes =
        <[u8; 32]>::try_from(vec).map_err(|_| serde::de::Error::custom("Invalid length"))?;
    Ok(U256::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use test_strategy::proptest;

    use crate::Element;

    #[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
    struct Example {
        element: Element,
    }

    #[proptest]
    fn element_serialize_bijection(element: Element) {
        let value = serde_json::to_value(Example { element }).unwrap();
        let again: Example = serde_json::from_value(value).unwrap();

        assert_eq!(element, again.element);
    }

    #[test]
    fn short_hex_is_left_padded() {
        let example: Example = serde_json::from_str(r#"{"element": "0x2a"}"#).unwrap();
        assert_eq!(example.element, Element::new(42));

        let too_long = format!(r#"{{"element": "{}"}}"#, "1".repeat(65));
        assert!(serde_json::from_str::<Example>(&too_long).is_err());
    }
}
