use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub author: String,
    #[serde(default)]
    pub author_details: AuthorDetails,
    pub content: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AuthorDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    pub avatar_path: Option<String>,
    pub rating: Option<f64>,
}
