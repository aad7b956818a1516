//! Structural shape descriptors served by [`crate::plugin::DiagramPlugin::schema`].
//!
//! Hosts use these for form generation and documentation; the engine does not
//! enforce them at runtime (the typed model and validators do the real work).

use serde_json::{Value, json};

pub fn mindmap_schema() -> Value {
    json!({
        "$id": "kelpie/mindmap",
        "type": "object",
        "required": ["diagramType", "root", "nodes"],
        "properties": {
            "diagramType": { "const": "mindmap" },
            "root": { "type": "string", "description": "Id of the declared root node" },
            "nodes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "label"],
                    "properties": {
                        "id": { "type": "string" },
                        "label": { "type": "string" },
                        "parent": { "type": "string", "description": "Absent on the root node" },
                        "style": { "$ref": "#/$defs/style" }
                    }
                }
            },
            "layout": {
                "type": "object",
                "properties": {
                    "algorithm": { "enum": ["tree", "force", "circular"] },
                    "spacing": { "type": "number" }
                }
            }
        },
        "$defs": { "style": style_schema() }
    })
}

pub fn network_schema() -> Value {
    json!({
        "$id": "kelpie/network",
        "type": "object",
        "required": ["diagramType", "nodes", "edges"],
        "properties": {
            "diagramType": { "const": "network" },
            "layout": { "enum": ["force", "hierarchical", "circular", "grid"] },
            "nodes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "label", "type"],
                    "properties": {
                        "id": { "type": "string" },
                        "label": { "type": "string" },
                        "type": {
                            "enum": ["server", "client", "router", "switch", "database", "user", "custom"]
                        },
                        "position": { "$ref": "#/$defs/position" },
                        "size": {
                            "type": "object",
                            "properties": {
                                "width": { "type": "number" },
                                "height": { "type": "number" }
                            }
                        },
                        "style": { "$ref": "#/$defs/style" }
                    }
                }
            },
            "edges": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["source", "target"],
                    "properties": {
                        "source": { "type": "string" },
                        "target": { "type": "string" },
                        "label": { "type": "string" },
                        "type": { "enum": ["wired", "wireless", "logical", "physical"] }
                    }
                }
            }
        },
        "$defs": { "position": position_schema(), "style": style_schema() }
    })
}

pub fn flow_schema() -> Value {
    json!({
        "$id": "kelpie/swimlane",
        "type": "object",
        "required": ["diagramType", "lanes", "nodes", "edges"],
        "properties": {
            "diagramType": { "const": "swimlane" },
            "lanes": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["id", "label"],
                    "properties": {
                        "id": { "type": "string" },
                        "label": { "type": "string" },
                        "type": { "enum": ["pool", "lane"] }
                    }
                }
            },
            "phases": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["label", "startPosition", "endPosition"],
                    "properties": {
                        "label": { "type": "string" },
                        "startPosition": { "type": "number" },
                        "endPosition": { "type": "number" }
                    }
                }
            },
            "nodes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["id", "label", "laneId"],
                    "properties": {
                        "id": { "type": "string" },
                        "label": { "type": "string" },
                        "laneId": { "type": "string" },
                        "type": { "enum": ["start", "end", "decision", "process"] },
                        "position": { "$ref": "#/$defs/position" },
                        "style": { "$ref": "#/$defs/style" }
                    }
                }
            },
            "edges": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["source", "target"],
                    "properties": {
                        "source": { "type": "string" },
                        "target": { "type": "string" },
                        "label": { "type": "string" }
                    }
                }
            }
        },
        "$defs": { "position": position_schema(), "style": style_schema() }
    })
}

fn position_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "x": { "type": "number" },
            "y": { "type": "number" }
        }
    })
}

fn style_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": { "type": ["string", "number", "boolean"] }
    })
}
