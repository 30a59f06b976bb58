//! OpenAPI 3.0 description of the HTTP API, served at `GET /openapi`.

use axum::response::Json;
use serde_json::{Value, json};

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn response(description: &str, schema: Option<Value>) -> Value {
    match schema {
        Some(schema) => json!({ "description": description, "content": json_content(schema) }),
        None => json!({ "description": description }),
    }
}

fn error_response() -> Value {
    response("Error", Some(schema_ref("ErrorResponse")))
}

fn unauthorized() -> Value {
    response("Missing or invalid credentials", None)
}

fn request_body(schema: &str) -> Value {
    json!({ "required": true, "content": json_content(schema_ref(schema)) })
}

fn players_path() -> Value {
    let create = json!({
        "summary": "Register a player with a score of zero",
        "requestBody": request_body("CreatePlayerRequest"),
        "responses": {
            "201": response("Player registered", Some(schema_ref("CreatePlayerResponse"))),
            "400": error_response(),
            "401": unauthorized(),
            "409": error_response(),
        }
    });

    let update = json!({
        "summary": "Overwrite a player's score",
        "requestBody": request_body("UpdatePlayerRequest"),
        "responses": {
            "204": response("Score updated", None),
            "400": error_response(),
            "401": unauthorized(),
            "404": error_response(),
        }
    });

    let clear = json!({
        "summary": "Remove every player",
        "responses": {
            "204": response("Tournament cleared", None),
            "401": unauthorized(),
        }
    });

    let ranked_list = json!({ "type": "array", "items": schema_ref("RankedPlayer") });
    let list = json!({
        "summary": "List players by rank",
        "responses": {
            "200": response("Players, highest score first", Some(ranked_list)),
            "401": unauthorized(),
        }
    });

    json!({ "post": create, "put": update, "delete": clear, "get": list })
}

fn player_by_id_path() -> Value {
    let id_param = json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string", "format": "uuid" }
    });

    let get = json!({
        "summary": "Get a player with their rank",
        "parameters": [id_param],
        "responses": {
            "200": response("Player found", Some(schema_ref("RankedPlayer"))),
            "400": error_response(),
            "401": unauthorized(),
            "404": error_response(),
        }
    });

    json!({ "get": get })
}

fn health_path() -> Value {
    let get = json!({
        "summary": "Store health",
        "security": [],
        "responses": {
            "200": response("Healthy", None),
            "503": response("Store unreachable", None),
        }
    });

    json!({ "get": get })
}

fn schemas() -> Value {
    let uuid = json!({ "type": "string", "format": "uuid" });
    let score = json!({ "type": "integer", "format": "int64", "minimum": 0 });

    let create_request = json!({
        "type": "object",
        "required": ["name"],
        "properties": { "name": { "type": "string", "minLength": 1 } }
    });
    let create_response = json!({
        "type": "object",
        "required": ["id"],
        "properties": { "id": uuid }
    });
    let update_request = json!({
        "type": "object",
        "required": ["id", "score"],
        "properties": { "id": uuid, "score": score }
    });
    let ranked_player = json!({
        "type": "object",
        "required": ["id", "name", "score", "rank"],
        "properties": {
            "id": uuid,
            "name": { "type": "string" },
            "score": score,
            "rank": { "type": "integer", "minimum": 1 }
        }
    });
    let error = json!({
        "type": "object",
        "required": ["message"],
        "properties": { "message": { "type": "string" } }
    });

    json!({
        "CreatePlayerRequest": create_request,
        "CreatePlayerResponse": create_response,
        "UpdatePlayerRequest": update_request,
        "RankedPlayer": ranked_player,
        "ErrorResponse": error,
    })
}

/// Build the OpenAPI document
pub fn document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Tournament leaderboard",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "security": [{ "basicAuth": [] }],
        "paths": {
            "/players": players_path(),
            "/players/{id}": player_by_id_path(),
            "/health": health_path(),
        },
        "components": {
            "securitySchemes": { "basicAuth": { "type": "http", "scheme": "basic" } },
            "schemas": schemas(),
        }
    })
}

/// `GET /openapi`
pub async fn openapi_document() -> Json<Value> {
    Json(document())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = document();
        let paths = doc["paths"].as_object().unwrap();

        for method in ["post", "put", "delete", "get"] {
            assert!(paths["/players"][method].is_object(), "missing {method} /players");
        }
        assert!(paths["/players/{id}"]["get"].is_object());
        assert!(paths["/health"]["get"].is_object());
    }

    #[test]
    fn test_schema_refs_resolve() {
        let doc = document();
        let schemas = doc["components"]["schemas"].as_object().unwrap();
        let text = doc.to_string();

        for name in text
            .split("#/components/schemas/")
            .skip(1)
            .filter_map(|rest| rest.split('"').next())
        {
            assert!(schemas.contains_key(name), "unresolved schema {name}");
        }
    }
}
