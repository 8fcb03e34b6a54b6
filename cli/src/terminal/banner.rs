use colored::*;

use crate::terminal::print;

const BANNER_0: &str = r#"
      _____  ____    ___   _   _  _____  ____
     |  ___||  _ \  / _ \ | \ | ||_   _||  _ \
     | |_   | |_) || | | ||  \| |  | |  | |_) |
     |  _|  |  _ < | |_| || |\  |  | |  |  _ <
     |_|    |_| \_\ \___/ |_| \_|  |_|  |_| \_\
"#;

const BANNER_1: &str = r#"
         ____                 __
        / __/______  ___  / /_____
       / /_/ __/ _ \/ _ \/ __/ __/
      / __/ /_/ (_) / / / /_/ /
     /_/  \__/\___/_/ /_/\__/_/
"#;

pub fn print() {
    let n: u8 = rand::random_range(0..=1);
    let art: ColoredString = match n {
        0 => BANNER_0.bright_green(),
        _ => BANNER_1.truecolor(255, 165, 0),
    };
    print::print(&format!("{}", art));
}
