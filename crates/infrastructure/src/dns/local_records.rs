use super::wire::reply_to;
use async_trait::async_trait;
use dnsprofiler_application::ports::{DnsHandler, ResponseWriter};
use dnsprofiler_domain::config::LocalDnsRecord;
use hickory_proto::op::{Message, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA};
use hickory_proto::rr::{RData, Record, RecordType};
use rustc_hash::FxHashMap;
use std::net::IpAddr;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
struct LocalAddress {
    ip: IpAddr,
    ttl: u32,
}

/// Answers internal requests from statically configured records.
///
/// Known names get their A/AAAA records (NOERROR with no answers when the
/// family doesn't match the query type); unknown names get NXDOMAIN.
#[derive(Debug, Default)]
pub struct LocalRecordsHandler {
    records: FxHashMap<String, Vec<LocalAddress>>,
}

impl LocalRecordsHandler {
    pub fn new(records: &[LocalDnsRecord]) -> Self {
        let mut map: FxHashMap<String, Vec<LocalAddress>> = FxHashMap::default();
        for record in records {
            map.entry(normalize(&record.name))
                .or_default()
                .push(LocalAddress {
                    ip: record.ip,
                    ttl: record.ttl,
                });
        }
        Self { records: map }
    }

    fn answers(&self, query: &Query) -> Option<Vec<Record>> {
        let addresses = self.records.get(&normalize(&query.name().to_string()))?;
        let query_type = query.query_type();

        let answers = addresses
            .iter()
            .filter_map(|addr| {
                let rdata = match addr.ip {
                    IpAddr::V4(v4)
                        if matches!(query_type, RecordType::A | RecordType::ANY) =>
                    {
                        RData::A(A::from(v4))
                    }
                    IpAddr::V6(v6)
                        if matches!(query_type, RecordType::AAAA | RecordType::ANY) =>
                    {
                        RData::AAAA(AAAA::from(v6))
                    }
                    _ => return None,
                };
                Some(Record::from_rdata(query.name().clone(), addr.ttl, rdata))
            })
            .collect();

        Some(answers)
    }
}

#[async_trait]
impl DnsHandler for LocalRecordsHandler {
    async fn serve_dns(&self, writer: &mut dyn ResponseWriter, message: &Message) {
        let mut response = reply_to(message, ResponseCode::NoError);
        response.set_authoritative(true);

        for query in message.queries() {
            match self.answers(query) {
                Some(answers) => {
                    for answer in answers {
                        response.add_answer(answer);
                    }
                }
                None => {
                    debug!(name = %query.name(), "No local record");
                    response.set_response_code(ResponseCode::NXDomain);
                }
            }
        }

        if let Err(e) = writer.write_msg(&response).await {
            warn!(error = %e, "Failed to write local answer");
        }
    }
}

fn normalize(name: &str) -> String {
    let mut name = name.to_ascii_lowercase();
    if !name.ends_with('.') {
        name.push('.');
    }
    name
}
