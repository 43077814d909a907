//! Line-oriented path input.
//!
//! Path data is read in blocks: consecutive non-empty lines are joined
//! (without a separator) into one path, and an empty line ends the block.
//! Two empty lines in a row end the input, as does EOF.

use std::io::{self, BufRead};

pub fn read_paths<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut blank_run = 0;

    for line in reader.lines() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.is_empty() {
            if !current.is_empty() {
                paths.push(std::mem::take(&mut current));
            }
            blank_run += 1;
            if blank_run == 2 {
                break;
            }
        } else {
            current.push_str(line);
            blank_run = 0;
        }
    }

    if !current.is_empty() {
        paths.push(current);
    }
    Ok(paths)
}
