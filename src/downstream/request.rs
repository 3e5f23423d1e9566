//! Request descriptors
//!
//! A [`DownstreamRequest`] is plain data describing one backend call. The
//! services layer builds them; [`super::Downstream::dispatch`] sends them.

use std::fmt;

use reqwest::Method;
use serde::Serialize;

use super::error::DownstreamError;

/// One backend call: method, relative path template, params and body.
#[derive(Debug, Clone, PartialEq)]
pub struct DownstreamRequest {
    pub method: Method,
    /// Relative path with `{name}` placeholders, e.g. `users/{externalId}`
    pub path_template: &'static str,
    pub path_params: Vec<(&'static str, String)>,
    /// Query pairs in the order they are sent
    pub query: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl DownstreamRequest {
    pub fn new(method: Method, path_template: &'static str) -> Self {
        Self {
            method,
            path_template,
            path_params: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path_template: &'static str) -> Self {
        Self::new(Method::GET, path_template)
    }

    pub fn post(path_template: &'static str) -> Self {
        Self::new(Method::POST, path_template)
    }

    pub fn put(path_template: &'static str) -> Self {
        Self::new(Method::PUT, path_template)
    }

    pub fn delete(path_template: &'static str) -> Self {
        Self::new(Method::DELETE, path_template)
    }

    pub fn path_param(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.path_params.push((name, value.into()));
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query pair only when a value is present.
    pub fn query_opt<V: fmt::Display>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json_body<T: Serialize>(mut self, body: &T) -> Result<Self, DownstreamError> {
        let value = serde_json::to_value(body)
            .map_err(|e| DownstreamError::InvalidRequest(format!("unencodable body: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Look up a query value by key (first occurrence).
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Substitute path params into the template.
    ///
    /// Values are inserted literally: no percent-encoding is applied, so an
    /// identifier that is already URL-safe (or already encoded) reaches the
    /// backend unchanged.
    pub fn render_path(&self) -> Result<String, DownstreamError> {
        let mut rendered = String::with_capacity(self.path_template.len() + 36);
        let mut rest = self.path_template;

        while let Some(open) = rest.find('{') {
            let close = rest[open..].find('}').map(|i| open + i).ok_or_else(|| {
                DownstreamError::InvalidRequest(format!(
                    "unterminated placeholder in {}",
                    self.path_template
                ))
            })?;
            let name = &rest[open + 1..close];
            let value = self
                .path_params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| value.as_str())
                .ok_or_else(|| {
                    DownstreamError::InvalidRequest(format!(
                        "missing path param '{name}' for {}",
                        self.path_template
                    ))
                })?;

            rendered.push_str(&rest[..open]);
            rendered.push_str(value);
            rest = &rest[close + 1..];
        }
        rendered.push_str(rest);

        Ok(rendered)
    }
}

impl fmt::Display for DownstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_path_substitutes_literally() {
        let req = DownstreamRequest::get("users/{externalId}/delete")
            .path_param("externalId", "a1b2%2Fc3");
        assert_eq!(req.render_path().unwrap(), "users/a1b2%2Fc3/delete");
    }

    #[test]
    fn test_render_path_without_placeholders() {
        let req = DownstreamRequest::delete("bills/delete");
        assert_eq!(req.render_path().unwrap(), "bills/delete");
    }

    #[test]
    fn test_render_path_missing_param() {
        let req = DownstreamRequest::get("bills/{externalId}");
        let err = req.render_path().unwrap_err();
        assert!(err.to_string().contains("externalId"));
    }

    #[test]
    fn test_render_path_unterminated_placeholder() {
        let req = DownstreamRequest::get("bills/{externalId").path_param("externalId", "x");
        assert!(req.render_path().is_err());
    }

    #[test]
    fn test_query_opt_skips_absent_values() {
        let req = DownstreamRequest::get("users/all")
            .query("pageNumber", 0)
            .query_opt("firstNameFilter", None::<&str>)
            .query_opt("lastNameFilter", Some("Ivanov"));
        assert_eq!(
            req.query,
            vec![
                ("pageNumber".to_string(), "0".to_string()),
                ("lastNameFilter".to_string(), "Ivanov".to_string()),
            ]
        );
        assert_eq!(req.query_value("lastNameFilter"), Some("Ivanov"));
        assert_eq!(req.query_value("firstNameFilter"), None);
    }

    #[test]
    fn test_json_body() {
        let req = DownstreamRequest::post("users/add")
            .json_body(&serde_json::json!({"firstName": "Anna"}))
            .unwrap();
        assert_eq!(req.body, Some(serde_json::json!({"firstName": "Anna"})));
        assert_eq!(req.to_string(), "POST users/add");
    }
}
