use anyhow::Context;
use reserve_interface::{error::ReserveError, instructions::InstructionTag};
use solana_client::{
    client_error::{ClientError, ClientErrorKind},
    rpc_client::RpcClient,
    rpc_response::RpcSimulateTransactionResult,
};
use solana_instruction::Instruction;
use solana_sdk::{
    message::Message,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};

use crate::logs::{log_error, log_info, log_success};

pub const DEFAULT_FUND_AMOUNT: u64 = 10_000_000_000;

/// Funds `keypair` (or a fresh one) via airdrop and waits for the airdrop to confirm.
pub async fn fund_account(rpc: &RpcClient, keypair: Option<Keypair>) -> anyhow::Result<Keypair> {
    let payer = match keypair {
        Some(kp) => kp,
        None => Keypair::new(),
    };

    let airdrop_signature = rpc
        .request_airdrop(&payer.pubkey(), DEFAULT_FUND_AMOUNT)
        .context("Failed to request airdrop")?;

    let mut i = 0;
    // Wait for airdrop confirmation.
    while !rpc
        .confirm_transaction(&airdrop_signature)
        .context("Couldn't confirm transaction")?
        && i < 10
    {
        std::thread::sleep(std::time::Duration::from_millis(500));
        i += 1;
    }

    Ok(payer)
}

pub async fn send_transaction(
    rpc: &RpcClient,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
) -> anyhow::Result<Signature> {
    send_transaction_with_config(rpc, payer, signers, instructions, None).await
}

pub struct SendTransactionConfig {
    pub debug_logs: bool,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig { debug_logs: true }
    }
}

/// Signs `instructions` with `payer` plus `signers` into one atomic transaction and submits it.
///
/// There is no retry policy: any failure aborts the provisioning run and propagates to the
/// caller after a best-effort decode of the program's custom error code.
pub async fn send_transaction_with_config(
    rpc: &RpcClient,
    payer: &Keypair,
    signers: &[&Keypair],
    instructions: &[Instruction],
    config: Option<SendTransactionConfig>,
) -> anyhow::Result<Signature> {
    let bh = rpc
        .get_latest_blockhash()
        .context("Failed to fetch a recent blockhash")?;

    let SendTransactionConfig { debug_logs } = config.unwrap_or_default();

    let msg = Message::new(instructions, Some(&payer.pubkey()));
    let mut tx = Transaction::new_unsigned(msg);

    let all_signers: Vec<&Keypair> = std::iter::once(payer)
        .chain(signers.iter().copied())
        .collect();
    tx.try_sign(&all_signers, bh)
        .context("Failed to sign transaction")?;

    match rpc.send_and_confirm_transaction(&tx) {
        Ok(sig) => {
            if debug_logs {
                log_success("Signature", sig);
                log_info("Sender", payer.pubkey());
            }
            Ok(sig)
        }
        Err(error) => {
            log_instruction_error(&error, instructions);
            log_info("Payer", payer.pubkey());

            Err(error).context("Failed transaction submission")
        }
    }
}

/// Decodes a preflight failure's custom error code back into a [`ReserveError`] plus the tag of
/// the failing instruction, falling back to the raw client error.
pub fn log_instruction_error(error: &ClientError, instructions: &[Instruction]) {
    use solana_client::rpc_request::{RpcError::RpcResponseError, RpcResponseErrorData};
    use solana_instruction_error::InstructionError;
    use solana_transaction_error::TransactionError;

    let kind = error.kind();
    if let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err: Some(ui_err),
                ..
            }),
        ..
    }) = kind
    {
        if let TransactionError::InstructionError(ixn_idx, InstructionError::Custom(code)) =
            ui_err.clone().into()
        {
            let decoded = instructions
                .get(ixn_idx as usize)
                .and_then(|ixn| ixn.data.first())
                .and_then(|&tag| InstructionTag::try_from(tag).ok())
                .zip(u8::try_from(code).ok().and_then(ReserveError::from_repr));

            if let Some((tag, reserve_error)) = decoded {
                log_error("Lending error", format!("({tag}, {reserve_error})"));
                return;
            }
        }
    }
    log_error("Transaction error", error);
}
