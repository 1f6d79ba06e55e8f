use std::path::PathBuf;
use std::time::Instant;

use eyre::{Context, Result};
use vectopng::{convert, Config};

fn main() -> Result<()> {
    eprintln!("{:<30} {}", "path", "render time");

    for path in glob::glob("./data/ic_*.xml")? {
        let path = path?;
        render(path)?;
    }

    Ok(())
}

fn render(path: PathBuf) -> Result<()> {
    let start = Instant::now();

    let mut config = Config::new(&path);
    config.colors_file = Some(PathBuf::from("./data/colors.xml"));
    config.ios = true;

    let written =
        convert(&config).wrap_err_with(|| format!("failed to render {}", path.display()))?;

    for out in written {
        eprintln!("{:<30} {:?}", out.display(), start.elapsed());
    }

    Ok(())
}
