use crate::client::Client;
use crate::error::Result;
use crate::request::RequestDescriptor;
use crate::types::NewClient;
use serde_json::Value;

impl Client {
    /// List the client accounts of the agency.
    pub async fn list_clients(&self) -> Result<Value> {
        self.execute(&RequestDescriptor::get("client")).await
    }

    /// Add a client account.
    pub async fn create_client(&self, client: &NewClient) -> Result<Value> {
        let request = RequestDescriptor::post("client/save").json_body(client)?;
        self.execute(&request).await
    }
}
