//! Wire helpers shared by the listener and the downstream handlers.

use dnsprofiler_domain::DomainError;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};

/// Maximum UDP DNS message size with EDNS(0)
pub const MAX_UDP_MESSAGE_SIZE: usize = 4096;

pub fn decode(bytes: &[u8]) -> Result<Message, DomainError> {
    Message::from_vec(bytes)
        .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to parse DNS message: {}", e)))
}

pub fn encode(message: &Message) -> Result<Vec<u8>, DomainError> {
    let mut buf = Vec::with_capacity(512);
    let mut encoder = BinEncoder::new(&mut buf);

    message.emit(&mut encoder).map_err(|e| {
        DomainError::InvalidDnsMessage(format!("Failed to serialize DNS message: {}", e))
    })?;

    Ok(buf)
}

/// Empty reply to `request` carrying its id, opcode and questions.
pub fn reply_to(request: &Message, code: ResponseCode) -> Message {
    let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
    response.set_recursion_desired(request.recursion_desired());
    response.set_response_code(code);
    for query in request.queries() {
        response.add_query(query.clone());
    }
    response
}
