//! Common macros for implementing ID wrapper types.

/// Text identifiers. The server is inconsistent about whether these travel
/// as JSON strings or numbers, so deserialization accepts both.
macro_rules! impl_text_id {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn from_string(s: String) -> Self {
                    Self(s)
                }

                pub fn as_str(&self) -> &str {
                    &self.0
                }

                pub fn into_inner(self) -> String {
                    self.0
                }

                pub fn is_empty(&self) -> bool {
                    self.0.is_empty()
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<String> for $name {
                fn from(s: String) -> Self {
                    Self(s)
                }
            }

            impl From<&str> for $name {
                fn from(s: &str) -> Self {
                    Self(s.to_string())
                }
            }

            impl From<i64> for $name {
                fn from(n: i64) -> Self {
                    Self(n.to_string())
                }
            }

            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    &self.0
                }
            }

            impl serde::Serialize for $name {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.serialize_str(&self.0)
                }
            }

            impl<'de> serde::Deserialize<'de> for $name {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    #[derive(serde::Deserialize)]
                    #[serde(untagged)]
                    enum Scalar {
                        Text(String),
                        Int(i64),
                    }

                    Ok(match Scalar::deserialize(deserializer)? {
                        Scalar::Text(s) => Self(s),
                        Scalar::Int(n) => Self(n.to_string()),
                    })
                }
            }
        )*
    };
}

/// Database row identifiers assigned by the server.
macro_rules! impl_row_id {
    ($($name:ident),* $(,)?) => {
        $(
            impl $name {
                pub fn new(id: i64) -> Self {
                    Self(id)
                }

                pub fn get(self) -> i64 {
                    self.0
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<i64> for $name {
                fn from(id: i64) -> Self {
                    Self(id)
                }
            }
        )*
    };
}

pub(crate) use impl_row_id;
pub(crate) use impl_text_id;
