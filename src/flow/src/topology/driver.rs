//! Execution driver: the synchronous push loop behind `Topology::start()`.

use crate::error::FlowError;
use crate::model::Tuple;
use crate::operator::{Operator, OutputContext, RecordSource};

/// Pull the source to exhaustion, pushing one record at a time depth-first
/// through every operator in attachment order.
///
/// Record `n` fully propagates, terminals included, before record `n+1` is
/// fetched, so output order matches input order and only one record is in
/// flight at any time. A record dropped by an operator stops propagating
/// there. The first error unwinds the whole run; effects already performed
/// for earlier records remain.
pub(crate) fn run_chain(
    source: &mut dyn RecordSource,
    operators: &mut [Box<dyn Operator>],
) -> Result<(), FlowError> {
    source.open()?;
    let mut ctx = OutputContext::new();

    loop {
        let Some(line) = source.next_record()? else {
            break;
        };
        ctx.advance();

        let mut tuple = Some(Tuple::raw_line(line));
        for operator in operators.iter_mut() {
            let Some(current) = tuple.take() else {
                break;
            };
            tuple = operator.process(current, &mut ctx)?;
        }

        if ctx.stop_requested() {
            tracing::info!(record_seq = ctx.record_seq(), "stop requested by operator");
            break;
        }
    }

    for operator in operators.iter_mut() {
        operator.finish();
    }
    tracing::info!(records = ctx.record_seq(), "stream ended");
    Ok(())
}
