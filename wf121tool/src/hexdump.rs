const WIDTH: usize = 0x10;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Line<'a> {
    address: usize,
    data: &'a [u8],
}

pub fn printable(chr: u8) -> Option<char> {
    if (0x20..0x7f).contains(&chr) {
        Some(chr as char)
    } else {
        None
    }
}

impl<'a> std::fmt::Display for Line<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:04x}", self.address)?;

        if self.data.is_empty() {
            return Ok(());
        }

        for i in 0..WIDTH {
            if i % 8 == 0 {
                write!(f, " ")?;
            }
            if i < self.data.len() {
                write!(f, " {:02x}", self.data[i])?;
            } else {
                write!(f, "   ")?;
            }
        }

        write!(f, "  |")?;

        for b in self.data {
            write!(f, "{}", printable(*b).unwrap_or('.'))?;
        }

        write!(f, "|")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineIter<'a> {
    data: &'a [u8],
    next: usize,
}

impl<'a> Iterator for LineIter<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next;
        if start >= self.data.len() {
            return None;
        }
        let end = (start + WIDTH).min(self.data.len());
        self.next = end;
        Some(Line {
            address: start,
            data: &self.data[start..end],
        })
    }
}

pub fn hexdump_iter(data: &[u8]) -> LineIter {
    LineIter { data, next: 0 }
}

pub fn hexdump(data: &[u8]) {
    for line in hexdump_iter(data) {
        println!("{}", line);
    }
}

pub fn hexdump_prefix(prefix: &str, data: &[u8]) {
    for line in hexdump_iter(data) {
        println!("{}{}", prefix, line);
    }
}
