//! Shared test support utilities for integration tests

#![allow(dead_code)]

use serde_json::{json, Value};
use shapeshift_core::{Error, Schema};

/// Build a schema from its document form
pub fn schema(document: Value) -> Schema {
    serde_json::from_value(document).expect("fixture schema should deserialize")
}

/// Person record schema covering renames, nested paths, placeholders and defaults
pub fn person_mapping() -> Schema {
    schema(json!({
        "__fields": {
            "name": {"map": "nome", "type": "string"},
            "age": {"map": "idade", "type": "string", "modifiers": ["enforce"]},
            "array_elem": {"map": ".profissoes[1].cargo", "type": "string", "array": true},
            "array_copy": {"map": ".detalhes.habilidades", "type": "string", "array": true},
            "dog": {
                "map": "cachorro",
                "type": "object",
                "__fields": {
                    "alias": {"map": "apelido", "type": "string"}
                }
            },
            "jobs": {
                "map": "profissoes",
                "type": "object",
                "array": true,
                "__fields": {
                    "business": {"map": "empresa", "type": "string"},
                    "position": {"map": ".nome", "type": "string"},
                    "wage": {
                        "map": "salario",
                        "type": "string",
                        "default": 1500,
                        "modifiers": ["enforce"]
                    },
                    "skill": {"map": ".detalhes.habilidades[]", "type": "string", "array": true}
                }
            },
            "details": {
                "map": "detalhes",
                "type": "object",
                "__fields": {
                    "skills": {"map": "habilidades", "type": "string", "array": true}
                }
            }
        }
    }))
}

pub fn person_sample() -> Value {
    json!({
        "nome": "jurandir",
        "idade": 23,
        "cachorro": {"apelido": "Thor"},
        "profissoes": [
            {"empresa": "capsul", "cargo": "programador"},
            {"empresa": "self-employed", "cargo": "tradutor e diagramador"}
        ],
        "detalhes": {"habilidades": ["programacao", "escrita"]}
    })
}

/// Array-rooted schema over records of mixed shape
pub fn roster_mapping() -> Schema {
    schema(json!({
        "array": true,
        "__fields": {
            "name": {"map": "nome", "type": "string"},
            "age": {
                "map": ["idade", "anos"],
                "type": "string",
                "modifiers": ["enforce", "default_null"]
            },
            "object_array": {
                "array": true,
                "type": "object",
                "__fields": {
                    "age": {
                        "map": [".idade", ".anos"],
                        "type": "string",
                        "modifiers": ["enforce", "default_null"]
                    },
                    "name": {"map": ".nome", "type": "string"}
                }
            },
            "deep_nested_map": {
                "map": "[].jobs.business.name",
                "type": "string",
                "default": "nope"
            },
            "nested": {
                "type": "object",
                "__fields": {
                    "original_age": {"map": [".idade", ".anos"], "type": "integer", "default": 0},
                    "to_array": {"map": [".idade", ".anos"], "array": true, "type": "integer", "default": []},
                    "deeper_nesting": {
                        "type": "object",
                        "__fields": {
                            "i_dont_exist": {"type": "string", "default": "cool"},
                            "path_test": {
                                "map": ".idade",
                                "type": "string",
                                "modifiers": ["enforce"],
                                "default": null
                            }
                        }
                    }
                }
            }
        }
    }))
}

pub fn roster_sample() -> Value {
    json!([
        {"nome": "João", "idade": 23},
        {"nome": "Pedro", "idade": 24},
        {"nome": "Terry", "anos": 50},
        {"nome": "Davis", "jobs": {"business": {"name": "Capsul"}}}
    ])
}

/// Order status table used by the token translator tests
pub fn order_statuses() -> Value {
    json!({
        "__fields": {
            "created": "",
            "waiting_payment": ["em análise", "aguardando pagamento", "pagamento atrasado"],
            "paid": ["pagamento aprovado", "parcialmente pago"],
            "cancelled": ["cancelada", "estorno pendente"],
            "shipment_exception": "devolvida",
            "chargeback": "chargeback"
        }
    })
}

/// Assert that a translation failed at `path`
pub fn assert_fails_at(result: Result<Value, Error>, path: &str) -> Error {
    match result {
        Ok(value) => panic!("expected failure at {path}, got {value}"),
        Err(err) => {
            assert_eq!(err.path(), Some(path), "unexpected error: {err}");
            err
        }
    }
}
