use super::*;

// -- Proof that the GPU has reached a fence value. Only SFence::wait_for_value hands these
// -- out, and anything that recycles GPU memory asks for one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SFenceCompletion {
    value: u64,
}

impl SFenceCompletion {
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn covers(&self, ticket: u64) -> bool {
        self.value >= ticket
    }
}

pub struct SFence<B: TBackend> {
    raw: B::Fence,

    fenceevent: B::Event,
    nextfencevalue: u64,
}

impl<B: TBackend> SFence<B> {
    // -- the raw fence must have been created with an initial value of 0
    pub fn new_from_raw(raw: B::Fence, evt: B::Event) -> Self {
        Self {
            raw: raw,
            fenceevent: evt,
            nextfencevalue: 0,
        }
    }

    pub fn raw(&self) -> &B::Fence {
        &self.raw
    }

    pub fn last_signalled_value(&self) -> u64 {
        self.nextfencevalue
    }

    pub fn completed_value(&self) -> u64 {
        self.raw.getcompletedvalue()
    }

    // -- the returned ticket is what the GPU reaches once everything submitted to queue so far
    // -- has finished
    pub fn signal(&mut self, queue: &SCommandQueue<B>) -> anyhow::Result<u64> {
        let ticket = self.nextfencevalue + 1;
        queue.raw().signal(&self.raw, ticket)?;
        self.nextfencevalue = ticket;
        trace!("Signalled fence ticket {}", ticket);
        Ok(ticket)
    }

    pub fn wait_for_value(&self, val: u64) -> anyhow::Result<SFenceCompletion> {
        if val > self.nextfencevalue {
            bail!(
                "Waiting on fence value {} which was never signalled (last is {})",
                val,
                self.nextfencevalue
            );
        }

        if self.raw.getcompletedvalue() < val {
            self.raw.seteventoncompletion(val, &self.fenceevent)?;
            self.fenceevent.waitforsingleobject(<u32>::max_value());
        }

        let completed = self.raw.getcompletedvalue();
        if completed < val {
            bail!("Fence wait returned at {} before reaching {}", completed, val);
        }

        Ok(SFenceCompletion { value: val })
    }

    pub fn flush_blocking(&mut self, queue: &SCommandQueue<B>) -> anyhow::Result<SFenceCompletion> {
        let lastfencevalue = self.signal(queue)?;
        self.wait_for_value(lastfencevalue)
    }
}
