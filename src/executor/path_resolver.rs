use std::path::{Path, PathBuf};

/// Maps a program token to the path handed to the OS.
///
/// There is no `PATH` search: a bare name is looked up in the working
/// directory, the same as any other relative path.
pub struct PathResolver;

impl PathResolver {
    pub fn resolve(&self, program: &str) -> PathBuf {
        if program.contains('/') {
            PathBuf::from(program)
        } else {
            Path::new(".").join(program)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_literal() {
        let resolver = PathResolver;
        assert_eq!(resolver.resolve("/bin/ls"), PathBuf::from("/bin/ls"));
        assert_eq!(resolver.resolve("bin/tool"), PathBuf::from("bin/tool"));
        assert_eq!(resolver.resolve("../tool"), PathBuf::from("../tool"));
    }

    #[test]
    fn test_bare_name_is_not_searched() {
        assert_eq!(PathResolver.resolve("ls"), PathBuf::from("./ls"));
    }
}
