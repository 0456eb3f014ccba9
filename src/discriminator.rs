//! `@odata.type` discriminator handling for polymorphic Graph payloads.
//!
//! Graph returns derived types through base-type endpoints. A device
//! configuration list, for example, mixes Windows, iOS and Android
//! configurations, each object tagged with its concrete type:
//!
//! ```json
//! { "@odata.type": "#microsoft.graph.iosGeneralDeviceConfiguration", ... }
//! ```
//!
//! [`discriminated_union!`] generates an enum with one variant per modelled
//! type plus an `Other` variant that keeps the raw JSON for types that are
//! not modelled, so new service-side types never break deserialization.
//! Tags are written without the leading `#`; it is stripped on read and
//! added back on write.

use serde::Serialize;
use serde_json::Value;

/// The discriminator property name.
pub const ODATA_TYPE: &str = "@odata.type";

/// Reads the discriminator of a JSON object, without the leading `#`.
pub fn discriminator(value: &Value) -> Option<&str> {
    value
        .get(ODATA_TYPE)?
        .as_str()
        .map(|s| s.trim_start_matches('#'))
}

/// Serializes `inner` and stamps it with `#{tag}`.
pub fn tagged<T: Serialize + ?Sized>(tag: &str, inner: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(inner)?;
    match &mut value {
        Value::Object(map) => {
            map.insert(ODATA_TYPE.to_string(), Value::String(format!("#{tag}")));
            Ok(value)
        }
        _ => Err(serde::ser::Error::custom(
            "polymorphic values must serialize to JSON objects",
        )),
    }
}

/// Declares a polymorphic model keyed on `@odata.type`.
///
/// ```ignore
/// discriminated_union! {
///     pub enum AssignmentTarget {
///         Group(GroupAssignmentTarget) = "microsoft.graph.groupAssignmentTarget",
///     }
/// }
/// ```
macro_rules! discriminated_union {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident($ty:ty) = $tag:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis enum $name {
            $(
                #[doc = concat!("`#", $tag, "`")]
                $(#[$vmeta])*
                $variant($ty),
            )+
            /// A payload whose `@odata.type` is missing or not modelled.
            Other(serde_json::Map<String, serde_json::Value>),
        }

        impl $name {
            /// The `@odata.type` of this value, without the leading `#`.
            pub fn odata_type(&self) -> Option<&str> {
                match self {
                    $( $name::$variant(_) => Some($tag), )+
                    $name::Other(map) => map
                        .get($crate::discriminator::ODATA_TYPE)
                        .and_then(|v| v.as_str())
                        .map(|s| s.trim_start_matches('#')),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                let value = match self {
                    $(
                        $name::$variant(inner) => $crate::discriminator::tagged($tag, inner)
                            .map_err(<S::Error as serde::ser::Error>::custom)?,
                    )+
                    $name::Other(map) => serde_json::Value::Object(map.clone()),
                };
                serde::Serialize::serialize(&value, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                let tag = $crate::discriminator::discriminator(&value).map(str::to_owned);
                match tag.as_deref() {
                    $(
                        Some($tag) => serde_json::from_value(value)
                            .map($name::$variant)
                            .map_err(<D::Error as serde::de::Error>::custom),
                    )+
                    _ => match value {
                        serde_json::Value::Object(map) => Ok($name::Other(map)),
                        other => Err(<D::Error as serde::de::Error>::custom(format!(
                            "expected a JSON object for {}, found {other}",
                            stringify!($name)
                        ))),
                    },
                }
            }
        }
    };
}

pub(crate) use discriminated_union;

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Circle {
        radius: f64,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Square {
        side_length: f64,
    }

    discriminated_union! {
        enum Shape {
            Circle(Circle) = "test.circle",
            Square(Square) = "test.square",
        }
    }

    #[test]
    fn picks_variant_from_discriminator() {
        let shape: Shape =
            serde_json::from_value(json!({"@odata.type": "#test.square", "sideLength": 2.0}))
                .unwrap();
        assert_eq!(shape, Shape::Square(Square { side_length: 2.0 }));
        assert_eq!(shape.odata_type(), Some("test.square"));
    }

    #[test]
    fn accepts_discriminator_without_hash() {
        let shape: Shape =
            serde_json::from_value(json!({"@odata.type": "test.circle", "radius": 1.5})).unwrap();
        assert!(matches!(shape, Shape::Circle(_)));
    }

    #[test]
    fn unknown_discriminator_keeps_raw_json() {
        let shape: Shape =
            serde_json::from_value(json!({"@odata.type": "#test.hexagon", "sides": 6})).unwrap();
        let Shape::Other(map) = &shape else {
            panic!("expected Other, got {shape:?}");
        };
        assert_eq!(map["sides"], 6);
        assert_eq!(shape.odata_type(), Some("test.hexagon"));

        // Serializing gives back exactly what came in.
        let back = serde_json::to_value(&shape).unwrap();
        assert_eq!(back, json!({"@odata.type": "#test.hexagon", "sides": 6}));
    }

    #[test]
    fn missing_discriminator_is_other() {
        let shape: Shape = serde_json::from_value(json!({"radius": 3.0})).unwrap();
        assert!(matches!(shape, Shape::Other(_)));
        assert_eq!(shape.odata_type(), None);
    }

    #[test]
    fn serialization_writes_discriminator() {
        let value = serde_json::to_value(Shape::Circle(Circle { radius: 4.0 })).unwrap();
        assert_eq!(value, json!({"@odata.type": "#test.circle", "radius": 4.0}));
    }

    #[test]
    fn non_object_is_rejected() {
        let result: Result<Shape, _> = serde_json::from_value(json!([1, 2, 3]));
        assert!(result.is_err());
    }

    #[test]
    fn tagged_rejects_scalars() {
        assert!(tagged("test.x", &5).is_err());
    }
}
