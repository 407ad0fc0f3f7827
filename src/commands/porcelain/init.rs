use crate::areas::repository::Repository;
use crate::areas::store::STATE_DIR;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        self.store().init()?;

        writeln!(self.writer(), "Initialized empty repository in {}", STATE_DIR)?;

        Ok(())
    }
}
