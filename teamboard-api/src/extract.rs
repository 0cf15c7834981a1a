/// Validating extractors
///
/// `ValidatedJson<T>` deserializes the request body and runs `validate()`;
/// `ValidatedQuery<T>` does the same for the query string and
/// `ValidatedPath<T>` parses path parameters. Handlers taking these never
/// see a payload that breaks a declared constraint.
///
/// Every failure (malformed JSON, missing field, unknown enum value, bad
/// date, `?limit=abc`, `/projects/abc`) is a 422 naming the offending field.

use crate::error::{ApiError, ApiResult};
use async_trait::async_trait;
use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, RawPathParams, Request,
    },
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use std::error::Error as StdError;
use validator::Validate;

type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// JSON body that has passed validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(from_json_rejection)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// Query string that has passed validation
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value: T = parse_query(parts.uri.query().unwrap_or_default())?;

        value.validate()?;

        Ok(ValidatedQuery(value))
    }
}

/// Path parameters parsed into their declared types
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ValidatedPath(value)),
            Err(rejection) => {
                let params = RawPathParams::from_request_parts(parts, state).await.ok();
                let names: Vec<&str> = params
                    .as_ref()
                    .map(|params| params.iter().map(|(name, _)| name).collect())
                    .unwrap_or_default();

                let text = rejection.body_text();
                tracing::debug!(rejection = %text, "Rejected path parameters");

                Err(ApiError::invalid_field(rejected_path_param(&rejection, &names), text))
            }
        }
    }
}

/// Deserializes a raw query string, naming the parameter that failed
fn parse_query<T: DeserializeOwned>(query: &str) -> ApiResult<T> {
    let deserializer =
        serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));

    serde_path_to_error::deserialize(deserializer).map_err(|err| {
        let field = match err.path().to_string() {
            path if path == "." => "query".to_string(),
            path => path,
        };

        ApiError::invalid_field(
            field,
            format!("Failed to deserialize query string: {}", err.inner()),
        )
    })
}

/// Name of the path parameter a rejection refers to
///
/// `names` lists the route's parameters in declaration order.
fn rejected_path_param(rejection: &PathRejection, names: &[&str]) -> String {
    let PathRejection::FailedToDeserializePathParams(inner) = rejection else {
        return "path".to_string();
    };

    match inner.kind() {
        ErrorKind::ParseErrorAtKey { key, .. } | ErrorKind::InvalidUtf8InPathParam { key } => {
            key.clone()
        }
        ErrorKind::ParseErrorAtIndex { index, .. } => names
            .get(*index)
            .map_or_else(|| "path".to_string(), |name| name.to_string()),
        ErrorKind::ParseError { .. } if names.len() == 1 => names[0].to_string(),
        _ => "path".to_string(),
    }
}

fn from_json_rejection(rejection: JsonRejection) -> ApiError {
    let text = rejection.body_text();
    tracing::debug!(rejection = %text, "Rejected request body");

    let field = match &rejection {
        JsonRejection::JsonDataError(_) => json_path_error(&rejection)
            .map_or_else(|| "body".to_string(), rejected_json_field),
        _ => "body".to_string(),
    };

    ApiError::invalid_field(field, text)
}

/// Finds the serde error carrying the JSON path in a rejection's source chain
fn json_path_error<'a>(rejection: &'a (dyn StdError + 'static)) -> Option<&'a JsonPathError> {
    let mut source = rejection.source();

    while let Some(err) = source {
        if let Some(path_error) = err.downcast_ref::<JsonPathError>() {
            return Some(path_error);
        }
        source = err.source();
    }

    None
}

/// Field a JSON deserialization error points at
///
/// A missing field fails at the enclosing object, so its name only appears
/// in serde's `missing field` message.
fn rejected_json_field(err: &JsonPathError) -> String {
    let path = err.path().to_string();
    if path != "." {
        return path;
    }

    let message = err.inner().to_string();
    message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split_once('`'))
        .map_or_else(|| "body".to_string(), |(name, _)| name.to_string())
}
