//! Shapes returned to HTTP callers.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::consts;

/// Envelope returned from the synchronous callback endpoint.
///
/// The status is always `"OK"`; the caller inspects `data` for either a
/// redirect target or a follow-up form submission. Decode or processing
/// failures degrade to an empty `data` map rather than an error status,
/// since the shopper-facing frontend cannot act on one.
#[derive(Clone, Debug, Serialize)]
pub struct CallbackResponse {
    status: &'static str,
    data: BTreeMap<String, String>,
}

impl CallbackResponse {
    pub fn redirect(url: String) -> Self {
        let mut data = BTreeMap::new();
        data.insert(consts::REDIRECT_URL_KEY.to_string(), url);
        Self { status: "OK", data }
    }

    pub fn form(url: String, method: String, fields: Vec<(String, String)>) -> Self {
        let mut data = BTreeMap::new();
        data.insert(consts::FORM_URL_KEY.to_string(), url);
        data.insert(consts::FORM_METHOD_KEY.to_string(), method);
        for (name, value) in fields {
            data.insert(name, value);
        }
        Self { status: "OK", data }
    }

    pub fn empty() -> Self {
        Self {
            status: "OK",
            data: BTreeMap::new(),
        }
    }

    pub fn data(&self) -> &BTreeMap<String, String> {
        &self.data
    }
}

/// Form body posted by the frontend to the callback endpoint.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct CallbackParams {
    #[serde(rename = "jsresponse")]
    pub js_response: Option<String>,
}
