// Texts and views serialize as plain strings, encodings by canonical name.
use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error, Visitor},
};

use crate::{Encoding, Text, TextView};

impl Serialize for TextView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_view().serialize(serializer)
    }
}

struct TextVisitor;

impl Visitor<'_> for TextVisitor {
    type Value = Text;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Text::from(value))
    }

    fn visit_char<E>(self, value: char) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(Text::from(value))
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(TextVisitor)
    }
}

impl Serialize for Encoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

struct EncodingVisitor;

impl Visitor<'_> for EncodingVisitor {
    type Value = Encoding;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an encoding name")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Encoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(EncodingVisitor)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;
    use crate::{Complexity, Cost};

    #[test]
    fn views_serialize_decoded() {
        let view = Encoding::Latin1.view(b"caf\xE9");
        assert_eq!(serde_json::to_string(&view).unwrap(), "\"café\"");

        let broken = Encoding::Utf8.view(b"a\xFFb");
        assert_eq!(serde_json::to_string(&broken).unwrap(), "\"a\u{FFFD}b\"");
    }

    #[test]
    fn text_round_trips_through_json() {
        let text = Text::from("Καλημέρα \"quoted\"");
        let json = serde_json::to_string(&text).unwrap();
        let back: Text = serde_json::from_str(&json).unwrap();
        assert_eq!(back, text);
    }

    #[test]
    fn encodings_use_names() {
        let json = serde_json::to_string(&Encoding::ALL.to_vec()).unwrap();
        assert_eq!(json, r#"["ASCII","Latin-1","MacRoman","UTF-8"]"#);

        let parsed: Vec<Encoding> = serde_json::from_str(r#"["utf8","iso-8859-1"]"#).unwrap();
        assert_eq!(parsed, [Encoding::Utf8, Encoding::Latin1]);

        let err = serde_json::from_str::<Encoding>(r#""koi8-r""#).unwrap_err();
        assert!(err.to_string().contains("unknown encoding 'koi8-r'"));
    }

    #[test]
    fn complexity_serializes_as_struct() {
        let json = serde_json::to_value(Encoding::Utf8.complexity()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "size": "Linear",
                "index": "Linear",
                "substr": "Linear",
                "iterate": "Constant",
            })
        );
        let back: Complexity = serde_json::from_value(json).unwrap();
        assert_eq!(back.iterate, Cost::Constant);
    }
}
