#[cfg(test)]
pub mod test {
    use crate::{BindError, BoxError, Field, FieldRef, Record, Slot, UnmarshalText, Visitor};

    #[derive(Debug, Default, PartialEq)]
    pub struct Service {
        pub name: String,
        pub port: u16,
        pub debug: bool,
        pub ratio: f64,
        pub retries: Option<u32>,
        pub mode: Mode,
        pub database: Database,
        pub cache: Option<Cache>,
        /// Untagged: never bound.
        pub notes: String,
    }

    impl Record for Service {
        fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError> {
            visitor.visit(FieldRef::new("name", "NAME", &mut self.name))?;
            visitor.visit(FieldRef::new("port", "PORT", &mut self.port))?;
            visitor.visit(FieldRef::new("debug", "DEBUG", &mut self.debug))?;
            visitor.visit(FieldRef::new("ratio", "RATIO", &mut self.ratio))?;
            visitor.visit(FieldRef::new("retries", "RETRIES", &mut self.retries))?;
            visitor.visit(FieldRef::new("mode", "MODE", &mut self.mode))?;
            visitor.visit(FieldRef::new("database", ",dive", &mut self.database))?;
            visitor.visit(FieldRef::new("cache", ",dive", &mut self.cache))?;
            visitor.visit(FieldRef::new("notes", "", &mut self.notes))?;
            Ok(())
        }
    }

    impl Field for Service {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Record(self)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Database {
        pub host: String,
        pub pool_size: usize,
    }

    impl Record for Database {
        fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError> {
            visitor.visit(FieldRef::new("host", "DB_HOST", &mut self.host))?;
            visitor.visit(FieldRef::new("pool_size", "DB_POOL_SIZE", &mut self.pool_size))?;
            Ok(())
        }
    }

    impl Field for Database {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Record(self)
        }
    }

    #[derive(Debug, Default, PartialEq)]
    pub struct Cache {
        pub url: String,
    }

    impl Record for Cache {
        fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError> {
            visitor.visit(FieldRef::new("url", "CACHE_URL", &mut self.url))
        }
    }

    impl Field for Cache {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Record(self)
        }
    }

    // -- Hook type: parsed only through UnmarshalText ---------------------------

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    pub enum Mode {
        #[default]
        Fast,
        Slow,
    }

    impl UnmarshalText for Mode {
        fn unmarshal_text(&mut self, text: &str) -> Result<(), BoxError> {
            *self = match text {
                "fast" => Mode::Fast,
                "slow" => Mode::Slow,
                other => return Err(format!("unknown mode '{other}'").into()),
            };
            Ok(())
        }
    }

    crate::text_field!(Mode);

    // -- Invalid shapes -----------------------------------------------------------

    /// `,dive` on a scalar, preceded by a field that binds fine.
    #[derive(Debug, Default)]
    pub struct BadDive {
        pub name: String,
        pub info: String,
        pub after: String,
    }

    impl Record for BadDive {
        fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError> {
            visitor.visit(FieldRef::new("name", "NAME", &mut self.name))?;
            visitor.visit(FieldRef::new("info", ",dive", &mut self.info))?;
            visitor.visit(FieldRef::new("after", "AFTER", &mut self.after))?;
            Ok(())
        }
    }

    impl Field for BadDive {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Record(self)
        }
    }

    /// A literal-tagged sequence with no hook.
    #[derive(Debug, Default)]
    pub struct WithList {
        pub hosts: Vec<String>,
    }

    impl Record for WithList {
        fn visit_fields(&mut self, visitor: &mut dyn Visitor) -> Result<(), BindError> {
            visitor.visit(FieldRef::new("hosts", "HOSTS", &mut self.hosts))
        }
    }

    impl Field for WithList {
        fn slot(&mut self) -> Slot<'_> {
            Slot::Record(self)
        }
    }
}
