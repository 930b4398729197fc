use crate::DataProvider;

/// Builds a session store from its arguments, whatever the store is.
pub struct DataProviderFactory;

impl DataProviderFactory {
    pub fn create<T: DataProvider>(args: T::Args) -> Result<T, T::ErrorKind> {
        T::new(args)
    }
}
