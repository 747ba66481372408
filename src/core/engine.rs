use crate::core::due_dates::{assign_due_by_list, assign_due_by_title};
use crate::core::members::assign_default_members;
use crate::core::ordering::sort_by_due;
use crate::core::{BoardClient, BoardList, Clock, ConfigProvider, Result, SystemClock};
use std::io::Write;
use std::ops::AddAssign;
use std::sync::Mutex;

/// Number of writes issued by a run, per pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lists: usize,
    pub due_dates_set: usize,
    pub members_set: usize,
    pub positions_moved: usize,
}

impl AddAssign for RunSummary {
    fn add_assign(&mut self, other: Self) {
        self.lists += other.lists;
        self.due_dates_set += other.due_dates_set;
        self.members_set += other.members_set;
        self.positions_moved += other.positions_moved;
    }
}

pub struct UpkeepEngine<B: BoardClient, C: ConfigProvider> {
    board: B,
    config: C,
    clock: Box<dyn Clock>,
    // Receives the per-pass status lines; stdout unless replaced.
    progress: Mutex<Box<dyn Write + Send>>,
}

impl<B: BoardClient, C: ConfigProvider> UpkeepEngine<B, C> {
    pub fn new(board: B, config: C) -> Self {
        Self {
            board,
            config,
            clock: Box::new(SystemClock),
            progress: Mutex::new(Box::new(std::io::stdout())),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_progress(mut self, writer: impl Write + Send + 'static) -> Self {
        self.progress = Mutex::new(Box::new(writer));
        self
    }

    fn status(&self, line: &str) -> Result<()> {
        let mut writer = match self.progress.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };
        writeln!(writer, "{}", line)?;
        writer.flush()?;
        Ok(())
    }

    /// Walks every list on the board in service order. The first error aborts the run;
    /// writes already issued stay on the board.
    pub async fn run(&self) -> Result<RunSummary> {
        let board_id = self.config.board_id();
        tracing::info!(board_id, "Starting board upkeep");

        let lists = self.board.list_lists(board_id).await?;
        tracing::debug!("Board has {} lists", lists.len());

        let mut summary = RunSummary::default();
        for list in &lists {
            summary += self.process_list(list).await?;
        }

        tracing::info!(
            lists = summary.lists,
            due_dates_set = summary.due_dates_set,
            members_set = summary.members_set,
            positions_moved = summary.positions_moved,
            "Board upkeep finished"
        );
        Ok(summary)
    }

    /// Runs the four passes on one list. Each pass reads the list afresh.
    pub async fn process_list(&self, list: &BoardList) -> Result<RunSummary> {
        let rules = self.config.delay_rules();
        let clock = self.clock.as_ref();
        tracing::info!(list_id = %list.id, list = %list.name, "Processing list");

        self.status("Updating due dates")?;
        let by_title = assign_due_by_title(&self.board, list, rules, clock).await?;
        let by_list = assign_due_by_list(
            &self.board,
            list,
            rules,
            self.config.default_delay_days(),
            clock,
        )
        .await?;

        self.status("Updating members")?;
        let members_set =
            assign_default_members(&self.board, list, self.config.member_ids()).await?;

        self.status("Updating order")?;
        let positions_moved = sort_by_due(&self.board, list).await?;

        tracing::debug!(
            list = %list.name,
            by_title,
            by_list,
            members_set,
            positions_moved,
            "List done"
        );

        Ok(RunSummary {
            lists: 1,
            due_dates_set: by_title + by_list,
            members_set,
            positions_moved,
        })
    }
}
