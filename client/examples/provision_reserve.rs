use client::{
    config::{ProvisionConfig, Store},
    provision::provision_reserve,
    transactions::{fund_account, send_transaction},
};
use solana_client::rpc_client::RpcClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut store = Store::load_or_default("reserve-store.json");
    let config = ProvisionConfig::from_store(&store)?;
    let rpc = RpcClient::new(config.rpc_url.clone());

    let payer = fund_account(&rpc, None).await?;
    let setup = provision_reserve(&rpc, &payer, &config).await?;

    // Seed the reserve with some of the underlying asset.
    let mint_to = setup
        .context
        .reserve_mint
        .mint_to(&setup.context.reserve_token_account, 1_000_000_000)?;
    send_transaction(&rpc, &payer, &[], &[mint_to]).await?;

    config.write_to_store(&mut store);
    store.save()?;

    println!(
        "Initialized reserve {} (signature {})",
        setup.context.reserve, setup.signature
    );

    Ok(())
}
