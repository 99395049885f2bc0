//! Declared response schema for pattern synthesis
//!
//! The service is constrained to emit structurally valid AHAP JSON; parsing
//! on receipt still validates, the schema just makes malformed answers rare.

use serde_json::{json, Value};

/// OpenAPI-style schema mirroring the AHAP document shape
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "Version": { "type": "NUMBER", "description": "Should be 1.0" },
            "Pattern": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "Event": {
                            "type": "OBJECT",
                            "properties": {
                                "EventType": {
                                    "type": "STRING",
                                    "description": "HapticTransient or HapticContinuous"
                                },
                                "Time": {
                                    "type": "NUMBER",
                                    "description": "Start time in seconds"
                                },
                                "EventDuration": {
                                    "type": "NUMBER",
                                    "description": "Duration in seconds (for continuous only)"
                                },
                                "EventParameters": {
                                    "type": "ARRAY",
                                    "items": {
                                        "type": "OBJECT",
                                        "properties": {
                                            "ParameterID": {
                                                "type": "STRING",
                                                "description": "HapticIntensity or HapticSharpness"
                                            },
                                            "ParameterValue": {
                                                "type": "NUMBER",
                                                "description": "Value between 0.0 and 1.0"
                                            }
                                        },
                                        "required": ["ParameterID", "ParameterValue"]
                                    }
                                }
                            },
                            "required": ["EventType", "Time", "EventParameters"]
                        }
                    },
                    "required": ["Event"]
                }
            }
        },
        "required": ["Version", "Pattern"]
    })
}
