//! The end-to-end reserve provisioning flow.
//!
//! One run mints the underlying and liquidity tokens, creates the authority-owned token accounts,
//! and submits a single atomic transaction that allocates and initializes the reserve record.
//! There is exactly one call site per reserve; nothing here retries.

use anyhow::Context;
use reserve_interface::state::reserve::{Reserve, RESERVE_SIZE};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    program_pack::Pack,
    signature::{Keypair, Signature, Signer},
};
use spl_token_interface::state::{Account, Mint};

use crate::{
    config::ProvisionConfig,
    context::reserve::ReserveContext,
    logs::{log_info, log_success},
    transactions::send_transaction,
};

pub const DEFAULT_MINT_DECIMALS: u8 = 9;

pub struct ReserveSetup {
    pub context: ReserveContext,
    /// Signature of the transaction that initialized the reserve record.
    pub signature: Signature,
}

/// Provisions one reserve against fresh mints and token accounts.
///
/// The reserve account, both mints, and both token accounts are new keypairs; the derived
/// authority owns the token accounts and the liquidity mint. The reserve record allocation and
/// its initialization land in the same transaction, so a partially provisioned reserve account
/// can never be observed.
pub async fn provision_reserve(
    rpc: &RpcClient,
    payer: &Keypair,
    config: &ProvisionConfig,
) -> anyhow::Result<ReserveSetup> {
    let reserve = Keypair::new();
    let reserve_mint = Keypair::new();
    let liquidity_mint = Keypair::new();
    let reserve_token_account = Keypair::new();
    let collateral_token_account = Keypair::new();

    let context = ReserveContext::new(
        config,
        &payer.pubkey(),
        reserve.pubkey(),
        reserve_mint.pubkey(),
        liquidity_mint.pubkey(),
        reserve_token_account.pubkey(),
        collateral_token_account.pubkey(),
        DEFAULT_MINT_DECIMALS,
    );

    let mint_rent = rpc
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .context("Failed to fetch rent for a mint account")?;
    let token_account_rent = rpc
        .get_minimum_balance_for_rent_exemption(Account::LEN)
        .context("Failed to fetch rent for a token account")?;
    let reserve_rent = rpc
        .get_minimum_balance_for_rent_exemption(RESERVE_SIZE)
        .context("Failed to fetch rent for the reserve account")?;

    // Create both mints.
    let create_mints = [
        context.reserve_mint.create_mint(&payer.pubkey(), mint_rent)?,
        context
            .liquidity_mint
            .create_mint(&payer.pubkey(), mint_rent)?,
    ]
    .concat();
    send_transaction(rpc, payer, &[&reserve_mint, &liquidity_mint], &create_mints).await?;

    // Then the two token accounts owned by the derived authority.
    let create_token_accounts = [
        context.reserve_mint.create_token_account(
            &payer.pubkey(),
            &reserve_token_account.pubkey(),
            &context.authority,
            token_account_rent,
        )?,
        context.liquidity_mint.create_token_account(
            &payer.pubkey(),
            &collateral_token_account.pubkey(),
            &context.authority,
            token_account_rent,
        )?,
    ]
    .concat();
    send_transaction(
        rpc,
        payer,
        &[&reserve_token_account, &collateral_token_account],
        &create_token_accounts,
    )
    .await?;

    // Allocate and initialize the reserve record atomically.
    let signature = send_transaction(
        rpc,
        payer,
        &[&reserve],
        &context.init_reserve_instructions(&payer.pubkey(), reserve_rent),
    )
    .await?;

    verify_reserve_record(rpc, &context)?;

    log_success("Reserve", context.reserve);
    log_info(
        "Authority",
        format!("{} (bump {})", context.authority, context.bump_seed),
    );

    Ok(ReserveSetup { context, signature })
}

/// Fetches the reserve account back and checks the record the program wrote.
fn verify_reserve_record(rpc: &RpcClient, context: &ReserveContext) -> anyhow::Result<()> {
    let data = rpc
        .get_account_data(&context.reserve)
        .context("Failed to fetch the reserve account")?;
    let record = Reserve::unpack(&data)
        .map_err(|error| anyhow::anyhow!("Reserve account data is invalid: {error}"))?;

    if !record.is_initialized() {
        return Err(anyhow::anyhow!("Reserve record was not initialized"));
    }
    if record.reserve_token != context.reserve_token_account.to_bytes() {
        return Err(anyhow::anyhow!(
            "Reserve record names an unexpected reserve token account"
        ));
    }

    Ok(())
}
