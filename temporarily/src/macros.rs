#[doc(hidden)]
#[macro_export]
macro_rules! impl_path_options {
    () => {
        pub fn dir<P: Into<std::path::PathBuf>>(&mut self, dir: P) -> &mut Self {
            self.path.dir(dir);

            self
        }

        pub fn name<S: Into<String>>(&mut self, name: S) -> &mut Self {
            self.path.name(name);

            self
        }

        pub fn ext<S: Into<String>>(&mut self, ext: S) -> &mut Self {
            self.path.ext(ext);

            self
        }

        pub fn mode(&mut self, mode: u32) -> &mut Self {
            self.mode = Some(mode);

            self
        }

        pub fn path_options(&self) -> &$crate::path::PathOptions {
            &self.path
        }
    };
}
