//! Define our own macro to simplify the code
//!

/// Call the HTTP client with the proper arguments
///
/// - plain GET
///
#[macro_export]
macro_rules! http_get {
    ($self:ident, $url:expr) => {
        $self.client.clone().get($url).send()
    };
}

/// Call the HTTP client with the proper arguments
///
/// - POST of a form-encoded body
///
#[macro_export]
macro_rules! http_post_form {
    ($self:ident, $url:expr, $form:expr) => {
        $self
            .client
            .clone()
            .post($url)
            .header("content-type", "application/x-www-form-urlencoded")
            .form($form)
            .send()
    };
}
