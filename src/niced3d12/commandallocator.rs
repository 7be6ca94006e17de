use super::*;

pub struct SCommandAllocator<B: TBackend> {
    raw: B::CommandAllocator,
    type_: t12::ECommandListType,

    // -- fence ticket covering the last work recorded through this allocator
    inflightticket: Option<u64>,
}

impl<B: TBackend> SCommandAllocator<B> {
    pub fn new_from_raw(raw: B::CommandAllocator, type_: t12::ECommandListType) -> Self {
        Self {
            raw: raw,
            type_: type_,
            inflightticket: None,
        }
    }

    pub fn raw(&self) -> &B::CommandAllocator {
        &self.raw
    }

    pub fn type_(&self) -> t12::ECommandListType {
        self.type_
    }

    pub fn in_flight_ticket(&self) -> Option<u64> {
        self.inflightticket
    }

    pub fn mark_in_flight(&mut self, ticket: u64) -> anyhow::Result<()> {
        if let Some(current) = self.inflightticket {
            if ticket < current {
                bail!(
                    "Command allocator marked with ticket {} behind its in-flight ticket {}",
                    ticket,
                    current
                );
            }
        }
        self.inflightticket = Some(ticket);
        Ok(())
    }

    // -- the memory behind the allocator is only recycled once the GPU is past its work
    pub fn reset(&mut self, completion: &SFenceCompletion) -> anyhow::Result<()> {
        if let Some(ticket) = self.inflightticket {
            if !completion.covers(ticket) {
                bail!(
                    "Command allocator reset with completion {} but its work is on ticket {}",
                    completion.value(),
                    ticket
                );
            }
        }

        self.raw.reset().context("Resetting command allocator")?;
        self.inflightticket = None;
        Ok(())
    }
}
