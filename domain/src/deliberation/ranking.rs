//! Speaker-order validation
//!
//! The chairperson proposes a speaking order for the participants who
//! requested the floor. The proposal is free text from an oracle, so it
//! must be repaired into a permutation of the requesters before use.

/// Repair a proposed speaking order into a permutation of `requesters`.
///
/// Rules, applied in order:
/// - names that did not request the floor are dropped;
/// - duplicates are dropped, keeping the first occurrence;
/// - omitted requesters are appended in their original request order.
///
/// The result therefore always contains every requester exactly once.
/// An empty proposal (the unparseable-ranking case) degenerates to the
/// raw request order.
pub fn validate_speaking_order(requesters: &[String], proposed: &[String]) -> Vec<String> {
    let mut order: Vec<String> = Vec::with_capacity(requesters.len());

    for name in proposed {
        let name = name.trim();
        if requesters.iter().any(|r| r == name) && !order.iter().any(|o| o == name) {
            order.push(name.to_string());
        }
    }

    for requester in requesters {
        if !order.iter().any(|o| o == requester) {
            order.push(requester.clone());
        }
    }

    order
}
