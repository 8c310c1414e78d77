/// Errors raised while dissecting received PDUs. A received block is never
/// trusted; every failure here is local and logged by the caller.
#[derive(Debug, PartialEq, Eq)]
pub enum PduParseErr {
    /// A field read ran past the end of the block
    BufferEnded { field: Option<&'static str> },
    /// A field holds a reserved or undecodable value
    InvalidValue { field: &'static str, value: u64 },
}
