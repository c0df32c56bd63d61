use std::fmt;

use reqwest::Method;

/// Metadata about one outbound call, used to word fault messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    method: Method,
    resource_id: Option<&'a str>,
    action: Option<&'a str>,
}

impl<'a> Call<'a> {
    pub const fn new(method: Method, resource_id: Option<&'a str>) -> Self {
        Self {
            method,
            resource_id,
            action: None,
        }
    }

    pub const fn get(resource_id: &'a str) -> Self {
        Self::new(Method::GET, Some(resource_id))
    }

    /// A POST, optionally about an existing resource
    pub const fn post(resource_id: Option<&'a str>) -> Self {
        Self::new(Method::POST, resource_id)
    }

    pub const fn put(resource_id: &'a str) -> Self {
        Self::new(Method::PUT, Some(resource_id))
    }

    pub const fn patch(resource_id: &'a str) -> Self {
        Self::new(Method::PATCH, Some(resource_id))
    }

    pub const fn delete(resource_id: &'a str) -> Self {
        Self::new(Method::DELETE, Some(resource_id))
    }

    /// Describe what the caller was doing, e.g. `"customer lookup"`
    #[must_use]
    pub const fn with_action(mut self, action: &'a str) -> Self {
        self.action = Some(action);
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub const fn resource_id(&self) -> Option<&'a str> {
        self.resource_id
    }

    pub const fn action(&self) -> Option<&'a str> {
        self.action
    }
}

/// Diagnostic message shared by every fault the classifier produces
///
/// `<condition>[ during <action>] from <namespace> [method:<verb>] [resourceId:<id>][ [status:<n>]][ [response:<body>]]`
///
/// Calls without a resource id read `... from <namespace> on making a <verb> request ...`.
pub(crate) struct Diagnostic<'a> {
    condition: &'a str,
    namespace: &'a str,
    call: &'a Call<'a>,
    status: Option<u16>,
    response: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    pub(crate) const fn new(condition: &'a str, namespace: &'a str, call: &'a Call<'a>) -> Self {
        Self {
            condition,
            namespace,
            call,
            status: None,
            response: None,
        }
    }

    pub(crate) const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub(crate) const fn with_response(mut self, response: Option<&'a str>) -> Self {
        self.response = response;
        self
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.condition)?;
        if let Some(action) = self.call.action {
            write!(f, " during {action}")?;
        }
        write!(f, " from {}", self.namespace)?;

        match self.call.resource_id {
            Some(id) => write!(f, " [method:{}] [resourceId:{id}]", self.call.method)?,
            None => write!(f, " on making a {} request", self.call.method)?,
        }

        if let Some(status) = self.status {
            write!(f, " [status:{status}]")?;
        }
        if let Some(response) = self.response {
            write!(f, " [response:{response}]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_without_action() {
        let call = Call::put("42");

        let message = Diagnostic::new("Conflict observed", "users-ms", &call)
            .with_response(Some("taken"))
            .to_string();

        assert_eq!(
            message,
            "Conflict observed from users-ms [method:PUT] [resourceId:42] [response:taken]"
        );
    }

    #[test]
    fn message_with_action_and_status() {
        let call = Call::get("42").with_action("customer lookup");

        let message = Diagnostic::new("Error observed", "users-ms", &call)
            .with_status(500)
            .with_response(Some("boom"))
            .to_string();

        assert_eq!(
            message,
            "Error observed during customer lookup from users-ms [method:GET] [resourceId:42] [status:500] [response:boom]"
        );
    }

    #[test]
    fn message_without_resource_id() {
        let call = Call::post(None);

        let message = Diagnostic::new("Timeout error observed", "orders-ms", &call).to_string();

        assert_eq!(message, "Timeout error observed from orders-ms on making a POST request");
    }

    #[test]
    fn call_constructors_set_verbs() {
        assert_eq!(Call::get("1").method(), &Method::GET);
        assert_eq!(Call::patch("1").method(), &Method::PATCH);
        assert_eq!(Call::delete("1").method(), &Method::DELETE);
        assert_eq!(Call::post(Some("1")).resource_id(), Some("1"));
        assert_eq!(Call::put("1").with_action("rename").action(), Some("rename"));
    }
}
