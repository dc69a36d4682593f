use axum::{http::StatusCode, Json};
use serde::Serialize;

/// Uniform envelope wrapping every CRUD response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub response_obj: T,
    pub message: &'static str,
    pub status: u16,
}

pub fn envelope<T: Serialize>(
    message: &'static str,
    status: StatusCode,
    body: T,
) -> (StatusCode, Json<Envelope<T>>) {
    (
        status,
        Json(Envelope {
            response_obj: body,
            message,
            status: status.as_u16(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_serialization() {
        let (status, Json(body)) = envelope("Retrieved all cards", StatusCode::OK, vec![1, 2, 3]);
        assert_eq!(status, StatusCode::OK);

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["responseObj"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["message"], "Retrieved all cards");
        assert_eq!(json["status"], 200);
    }
}
