use alloy_network::TransactionBuilder;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest as RpcTransactionRequest;
use alloy_transport::{RpcError, TransportError};
use tracing::debug;
use workflow::{SubmissionError, TransactionHandle, TransactionRequest, TransactionSubmitter};

/// EIP-1193 error code for a request the user declined.
const USER_REJECTED_CODE: i64 = 4001;

/// Submits workflow transactions through an alloy provider.
///
/// The provider is expected to carry a wallet: nonce, gas and fees are filled
/// and the transaction is signed by the provider's fillers.
#[derive(Debug, Clone)]
pub struct ProviderSubmitter<P> {
    provider: P,
}

impl<P> ProviderSubmitter<P>
where
    P: Provider + Clone,
{
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> TransactionSubmitter for ProviderSubmitter<P>
where
    P: Provider + Clone,
{
    async fn submit(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionHandle, SubmissionError> {
        debug!(%request, "Sending transaction");

        let pending = self
            .provider
            .send_transaction(to_rpc_request(&request))
            .await
            .map_err(|e| map_send_error(&e))?;

        Ok(TransactionHandle::new(*pending.tx_hash()))
    }
}

/// Classify a failed `eth_sendTransaction`.
///
/// Error code 4001 is a declined request, any other error response means the
/// node refused the request, and transport failures mean it never got there.
pub fn map_send_error(error: &TransportError) -> SubmissionError {
    match error {
        RpcError::ErrorResp(payload) if payload.code == USER_REJECTED_CODE => {
            SubmissionError::Rejected(payload.message.to_string())
        }
        RpcError::ErrorResp(payload) => SubmissionError::Malformed(payload.message.to_string()),
        RpcError::Transport(_) | RpcError::NullResp => {
            SubmissionError::Unavailable(error.to_string())
        }
        _ => SubmissionError::Malformed(error.to_string()),
    }
}

/// Convert a workflow request into an RPC transaction request.
///
/// Nonce, gas and fee fields are left empty for the provider to fill.
pub fn to_rpc_request(request: &TransactionRequest) -> RpcTransactionRequest {
    RpcTransactionRequest::default()
        .with_from(request.from)
        .with_to(request.to)
        .with_chain_id(request.chain_id)
        .with_input(request.calldata())
}
