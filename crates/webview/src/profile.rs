//! Editing profiles
//!
//! The editing surface is configured once per open document: an OpenAPI
//! or AsyncAPI profile with its starter content and feature flags.

use apidesk_protocol::EditorProfile;
use serde::{Deserialize, Serialize};

const OPENAPI_DEMO_CONTENT: &str = r#"{
    "openapi": "3.0.2",
    "info": {
        "title": "Demo API",
        "version": "1.0.0",
        "description": "A sample API.",
        "termsOfService": "http://swagger.io/terms/"
    },
    "paths": {},
    "components": {}
}"#;

const ASYNCAPI_DEMO_CONTENT: &str = r#"{
  "asyncapi": "2.0.0",
  "info": {
    "title": "DEMO API",
    "version": "1.0.0",
    "description": "A sample API",
    "license": {
      "name": "Apache 2.0",
      "url": "https://www.apache.org/licenses/LICENSE-2.0"
    }
  }
}"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingInfoContent {
    #[serde(rename = "type")]
    pub profile: EditorProfile,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditingFeatures {
    pub allow_imports: bool,
    pub allow_custom_validations: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApiOptions {
    pub vendor_extensions: Vec<String>,
}

/// Everything the editing surface needs to configure itself for one
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingInfo {
    pub content: EditingInfoContent,
    pub features: EditingFeatures,
    pub openapi: OpenApiOptions,
}

impl EditingInfo {
    pub fn for_profile(profile: EditorProfile) -> Self {
        let value = match profile {
            EditorProfile::OpenApi => OPENAPI_DEMO_CONTENT,
            EditorProfile::AsyncApi => ASYNCAPI_DEMO_CONTENT,
        };
        Self {
            content: EditingInfoContent {
                profile,
                value: value.to_string(),
            },
            features: EditingFeatures {
                allow_imports: false,
                allow_custom_validations: false,
            },
            openapi: OpenApiOptions::default(),
        }
    }
}

/// One configured code-generation target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    pub name: String,
    pub url: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            name: "Fuse Camel Project".to_string(),
            url: "http://localhost:8080/api/v1/generate/camel-project.zip".to_string(),
        }
    }
}
