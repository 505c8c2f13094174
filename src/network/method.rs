//! The closed set of HTTP verbs a request may be issued with.

use std::fmt;
use std::str::FromStr;

use crate::network::error::Error;

/// An HTTP method that can be used when executing a request.
///
/// Anything outside this set is rejected at execution time with
/// [`Error::MethodNotSupported`]. Supporting another verb means adding a
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    DELETE,
    PUT,
    OPTION,
}

impl Method {
    /// Every supported method, in declaration order.
    pub const ALL: [Method; 5] = [
        Method::GET,
        Method::POST,
        Method::DELETE,
        Method::PUT,
        Method::OPTION,
    ];

    /// Canonical upper-case form, as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::DELETE => "DELETE",
            Method::PUT => "PUT",
            Method::OPTION => "OPTION",
        }
    }

    /// Whether `name` names a supported method, ignoring case.
    pub fn is_supported(name: &str) -> bool {
        name.parse::<Method>().is_ok()
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parses a method name case-insensitively (`"get"` and `"Get"` are both
    /// [`Method::GET`]).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == upper)
            .ok_or_else(|| Error::MethodNotSupported(s.to_string()))
    }
}

/// `OPTION` is not a registered verb, so it travels as an extension method.
impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::DELETE => reqwest::Method::DELETE,
            Method::PUT => reqwest::Method::PUT,
            Method::OPTION => reqwest::Method::from_bytes(b"OPTION")
                .expect("OPTION is a valid method token"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("get".parse::<Method>().unwrap(), Method::GET);
        assert_eq!("Post".parse::<Method>().unwrap(), Method::POST);
        assert_eq!("oPtIoN".parse::<Method>().unwrap(), Method::OPTION);
    }

    #[test]
    fn test_unknown_methods_are_rejected() {
        for name in ["", "PATCH", "OPTIONS", "HEAD", "GETS", " GET"] {
            let err = name.parse::<Method>().unwrap_err();
            assert!(matches!(err, Error::MethodNotSupported(ref n) if n == name));
            assert!(!Method::is_supported(name));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for method in Method::ALL {
            assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_into_reqwest_method() {
        assert_eq!(reqwest::Method::from(Method::GET), reqwest::Method::GET);
        assert_eq!(reqwest::Method::from(Method::DELETE), reqwest::Method::DELETE);
        assert_eq!(reqwest::Method::from(Method::OPTION).as_str(), "OPTION");
    }

    #[test]
    fn test_all_is_the_closed_set() {
        let names: Vec<&str> = Method::ALL.iter().map(Method::as_str).collect();
        assert_eq!(names, ["GET", "POST", "DELETE", "PUT", "OPTION"]);
    }
}
