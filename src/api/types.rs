use serde::{Deserialize, Serialize};

pub const STATE_VERSION_TYPE: &str = "state-versions";
pub const RUN_TYPE: &str = "runs";

/// Result of fetching an opaque byte payload from the API.
///
/// Absence is a value here, not an error: transport and auth failures travel
/// separately as [`super::ApiError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    Empty,
    Found(Vec<u8>),
}

impl Fetched {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            Self::Empty
        } else {
            Self::Found(bytes)
        }
    }

    #[allow(dead_code)] // NOTE: Used by tests
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobRecord {
    pub data: JobData,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobData {
    pub id: String,
    #[serde(default)]
    pub attributes: JobAttributes,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAttributes {
    #[serde(default)]
    pub terraform_plan: Option<String>,
}

impl JobRecord {
    /// Remote plan reference recorded for the job, if any.
    pub fn plan_reference(&self) -> Option<&str> {
        self.data
            .attributes
            .terraform_plan
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStateVersionRequest {
    pub data: CreateStateVersion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStateVersion {
    #[serde(rename = "type")]
    pub type_: String,
    pub attributes: StateVersionAttributes,
    pub relationships: StateVersionRelationships,
}

/// Both fields carry base64 text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StateVersionAttributes {
    pub json_state: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateVersionRelationships {
    pub run: RelationshipData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipData {
    pub data: ResourceIdentifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub type_: String,
    pub id: String,
}

impl CreateStateVersionRequest {
    pub fn new(job_id: &str, attributes: StateVersionAttributes) -> Self {
        Self {
            data: CreateStateVersion {
                type_: STATE_VERSION_TYPE.to_string(),
                attributes,
                relationships: StateVersionRelationships {
                    run: RelationshipData {
                        data: ResourceIdentifier {
                            type_: RUN_TYPE.to_string(),
                            id: job_id.to_string(),
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRequest {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputResponse {
    pub data: String,
}
