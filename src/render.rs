use std::{
    io::{self, Write},
    mem::MaybeUninit,
    os::fd::AsRawFd,
};

use engine_2048::{event::tile_value, PackedBoard};

const SQUARE_HEIGHT: usize = 3;
const SQUARE_WIDTH: usize = 7;
const COLOUR_TABLE: [u8; 7] = [90, 33, 31, 32, 33, 36, 35];

fn draw_border(out: &mut impl Write, width: usize, [left, mid, right]: [&str; 3]) -> io::Result<()> {
    out.write_all(left.as_bytes())?;

    for i in 0..width {
        if i != 0 {
            out.write_all(mid.as_bytes())?;
        }

        out.write_all("━".repeat(SQUARE_WIDTH).as_bytes())?;
    }

    writeln!(out, "{right}")
}

fn draw_board_row(out: &mut impl Write, board: &PackedBoard, j: usize) -> io::Result<()> {
    for line in 0..SQUARE_HEIGHT {
        for i in 0..board.width() {
            let cell = board.get_cell(i, j);

            let maybe_colour: Option<u8> = cell
                .checked_sub(1)
                .map(|k| COLOUR_TABLE[k as usize % COLOUR_TABLE.len()]);

            match maybe_colour {
                Some(colour) if line == SQUARE_HEIGHT / 2 => {
                    let num = tile_value(cell);

                    write!(out, "┃\x1b[7m\x1b[{colour}m{num:^SQUARE_WIDTH$}\x1b[m")?;
                }
                Some(colour) => {
                    write!(out, "┃\x1b[{}m{:SQUARE_WIDTH$}\x1b[m", colour + 10, "")?;
                }
                None => write!(out, "┃{:SQUARE_WIDTH$}", "")?,
            }
        }

        writeln!(out, "┃")?;
    }

    Ok(())
}

/// Lines written by [`draw_board`], status line included.
fn board_lines(board: &PackedBoard) -> usize {
    1 + board.height() * (SQUARE_HEIGHT + 1) + 1
}

pub fn draw_board(out: &mut impl Write, board: &PackedBoard, status: &str) -> io::Result<()> {
    writeln!(out, "{status}")?;
    draw_border(out, board.width(), ["┏", "┳", "┓"])?;

    for j in 0..board.height() {
        if j != 0 {
            draw_border(out, board.width(), ["┣", "╋", "┫"])?;
        }

        draw_board_row(out, board, j)?;
    }

    draw_border(out, board.width(), ["┗", "┻", "┛"])?;
    out.flush()
}

/// Moves back over the previous drawing and replaces it.
pub fn redraw_board(out: &mut impl Write, board: &PackedBoard, status: &str) -> io::Result<()> {
    write!(out, "\x1b[{}F\x1b[J", board_lines(board))?;

    draw_board(out, board, status)
}

/// Switches the terminal to unbuffered, unechoed input. Returns the settings to restore.
pub fn setup_terminal(fd: &impl AsRawFd) -> io::Result<libc::termios> {
    let fd = fd.as_raw_fd();
    let mut termios = MaybeUninit::uninit();

    let original = unsafe {
        if libc::tcgetattr(fd, termios.as_mut_ptr()) != 0 {
            return Err(io::Error::last_os_error());
        }

        termios.assume_init()
    };

    let mut raw = original;
    raw.c_lflag &= !(libc::ECHO | libc::ICANON);

    unsafe {
        if libc::tcsetattr(fd, libc::TCSADRAIN, &raw) != 0 {
            return Err(io::Error::last_os_error());
        }
    }

    Ok(original)
}

pub fn restore_terminal(fd: &impl AsRawFd, termios: &libc::termios) -> io::Result<()> {
    if unsafe { libc::tcsetattr(fd.as_raw_fd(), libc::TCSADRAIN, termios) } != 0 {
        return Err(io::Error::last_os_error());
    }

    Ok(())
}
