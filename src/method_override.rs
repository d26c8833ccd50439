use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::Method;
use rocket::{Data, Request};
use std::str::FromStr;

/// Rewrites the method of a POST request carrying a `_method` query
/// parameter, so plain HTML forms can reach the PUT and DELETE routes.
/// Runs before routing; the body is left untouched.
pub struct MethodOverride;

#[rocket::async_trait]
impl Fairing for MethodOverride {
    fn info(&self) -> Info {
        Info {
            name: "Method Override",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        if req.method() != Method::Post {
            return;
        }

        let value = match req.query_value::<&str>("_method") {
            Some(Ok(value)) => value.to_uppercase(),
            _ => return,
        };

        if let Ok(method) = Method::from_str(value.as_str()) {
            req.set_method(method);
        }
    }
}
