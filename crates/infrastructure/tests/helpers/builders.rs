use async_trait::async_trait;
use dnsprofiler_application::ports::ResponseWriter;
use dnsprofiler_domain::DomainError;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::{Name, RecordType};
use std::str::FromStr;

pub fn query(id: u16, name: &str, record_type: RecordType) -> Message {
    let mut q = Query::new();
    q.set_name(Name::from_str(name).unwrap());
    q.set_query_type(record_type);
    q.set_query_class(hickory_proto::rr::DNSClass::IN);

    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(q);
    message
}

#[derive(Default)]
pub struct CapturingWriter {
    pub written: Vec<Message>,
}

impl CapturingWriter {
    pub fn single(&self) -> &Message {
        assert_eq!(self.written.len(), 1, "expected exactly one reply");
        &self.written[0]
    }
}

#[async_trait]
impl ResponseWriter for CapturingWriter {
    async fn write_msg(&mut self, message: &Message) -> Result<(), DomainError> {
        self.written.push(message.clone());
        Ok(())
    }
}
