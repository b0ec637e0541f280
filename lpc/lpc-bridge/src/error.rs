/// Errors reported by the bridge.
///
/// Every error is terminal for the call that produced it: the bridge never
/// retries beyond the protocol's own poll budget and never reports partial
/// success. After any failure the destination buffer's contents are
/// unspecified for reads, and for writes that timed out after the start
/// trigger the transaction's effect on the bus is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LpcError {
    /// Empty buffer, unsupported transfer size, or a call issued before
    /// the bridge was registered.
    #[error("invalid argument")]
    InvalidArgument,

    /// A poll phase (idle wait or completion wait) exhausted its budget.
    #[error("transaction timed out")]
    Timeout,

    /// The controller completed but did not report the finished bit.
    #[error("controller reported unfinished transaction")]
    IoFailure,
}
