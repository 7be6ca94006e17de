use super::*;

pub struct SCommandQueue<B: TBackend> {
    raw: B::CommandQueue,

    commandlisttype: t12::ECommandListType,
}

impl<B: TBackend> SCommandQueue<B> {
    pub fn new_from_raw(raw: B::CommandQueue, type_: t12::ECommandListType) -> Self {
        Self {
            raw: raw,
            commandlisttype: type_,
        }
    }

    pub fn raw(&self) -> &B::CommandQueue {
        &self.raw
    }

    pub fn type_(&self) -> t12::ECommandListType {
        self.commandlisttype
    }

    // -- hands closed lists to the GPU and returns without waiting
    pub fn execute_command_list(&self, list: &mut SCommandList<B>) -> anyhow::Result<()> {
        if list.state() != ECommandListState::Closed {
            bail!("Only closed command lists can be executed, list is {:?}", list.state());
        }

        self.raw.executecommandlists(&[list.raw()]);
        list.mark_submitted();
        Ok(())
    }
}
