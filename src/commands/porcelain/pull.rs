use crate::areas::repository::Repository;

impl Repository {
    pub fn pull(&mut self) -> anyhow::Result<()> {
        self.show_location()?;

        let remote = self.config().remote.clone();
        let branch = self.vcs().current_branch()?;
        self.vcs().pull(&remote, branch.as_deref(), false)
    }
}
