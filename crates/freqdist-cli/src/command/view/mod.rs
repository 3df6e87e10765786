use crossterm::event::{self, Event, KeyEventKind};

use crate::command::InputArg;

use self::screen::DistributionScreen;

mod screen;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ViewArg {
    #[clap(flatten)]
    input: InputArg,
}

pub(crate) fn run(arg: &ViewArg) -> anyhow::Result<()> {
    let ViewArg { input } = arg;
    let analysis = input.load_analysis()?;
    let charts = analysis.charts();
    let mut screen = DistributionScreen::new(&analysis, &charts);

    ratatui::run(|terminal| -> anyhow::Result<()> {
        while !screen.should_exit() {
            terminal.draw(|f| screen.draw(f))?;
            if let Event::Key(key_event) = event::read()?
                && key_event.kind == KeyEventKind::Press
            {
                screen.handle_key(key_event.code);
            }
        }
        Ok(())
    })
}
