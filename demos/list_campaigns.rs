//! List campaigns and export the leads of the first one.
//!
//! Run with: `SMARTLEAD_API_KEY=your-key cargo run --example list_campaigns`

use smartlead::Client;

#[tokio::main]
async fn main() -> Result<(), smartlead::Error> {
    let client = Client::from_env()?;

    let campaigns = client.list_campaigns().await?;
    let campaigns = campaigns.as_array().cloned().unwrap_or_default();
    println!("Found {} campaigns", campaigns.len());

    let Some(campaign_id) = campaigns.first().and_then(|c| c["id"].as_u64()) else {
        return Ok(());
    };

    // Pages of 100 are fetched until the reported total is reached.
    let leads = client.list_all_campaign_leads(campaign_id).await?;
    println!("Campaign {} has {} leads", campaign_id, leads.len());

    let rows = client.export_campaign_lead_rows(campaign_id).await?;
    for row in rows.iter().take(5) {
        println!(
            "{} <{}>",
            row.get("first_name").map(String::as_str).unwrap_or(""),
            row.get("email").map(String::as_str).unwrap_or("")
        );
    }

    Ok(())
}
