use std::ops::{Deref, DerefMut};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use duckdb::Connection;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

use crate::domain::DomainError;

pub const DEFAULT_POOL_SIZE: usize = 5;

struct PoolInner {
    idle: Mutex<Vec<Connection>>,
    permits: Arc<Semaphore>,
    size: usize,
}

impl PoolInner {
    fn idle(&self) -> MutexGuard<'_, Vec<Connection>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A bounded pool of connections to one DuckDB database.
///
/// All connections are opened up front with `Connection::try_clone`, so they
/// share one database instance (this also holds for in-memory databases).
/// At most `size` callers hold a connection at once; the rest wait in
/// [`DuckdbPool::acquire`]. Cloning the pool is cheap and yields a handle to
/// the same connections.
#[derive(Clone)]
pub struct DuckdbPool {
    inner: Arc<PoolInner>,
}

impl DuckdbPool {
    pub fn open(db_path: &Path, size: usize) -> Result<Self, DomainError> {
        let conn = Connection::open(db_path)
            .map_err(|e| DomainError::storage(format!("Failed to open DuckDB database: {}", e)))?;
        debug!("Opened DuckDB database at {:?}", db_path);
        Self::from_connection(conn, size)
    }

    pub fn in_memory(size: usize) -> Result<Self, DomainError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DomainError::storage(format!("Failed to open DuckDB in-memory DB: {}", e))
        })?;
        Self::from_connection(conn, size)
    }

    fn from_connection(first: Connection, size: usize) -> Result<Self, DomainError> {
        let size = size.max(1);
        let mut idle = Vec::with_capacity(size);
        for _ in 1..size {
            let conn = first.try_clone().map_err(|e| {
                DomainError::storage(format!("Failed to open pooled connection: {}", e))
            })?;
            idle.push(conn);
        }
        idle.push(first);

        debug!("DuckDB pool ready with {} connections", size);
        Ok(Self {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(idle),
                permits: Arc::new(Semaphore::new(size)),
                size,
            }),
        })
    }

    /// Waits for a free connection. The connection goes back to the pool when
    /// the returned guard is dropped, whichever way the caller exits.
    pub async fn acquire(&self) -> Result<PooledConnection, DomainError> {
        let permit = Arc::clone(&self.inner.permits)
            .acquire_owned()
            .await
            .map_err(|_| DomainError::storage("Connection pool is closed"))?;

        let conn = self
            .inner
            .idle()
            .pop()
            .ok_or_else(|| DomainError::storage("Connection pool is closed"))?;

        Ok(PooledConnection {
            conn: Some(conn),
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }

    /// Stops handing out connections and closes the idle ones. Connections
    /// still checked out are closed when their guards drop.
    pub fn close(&self) {
        self.inner.permits.close();
        let conns = std::mem::take(&mut *self.inner.idle());
        let count = conns.len();
        for conn in conns {
            if let Err((_, e)) = conn.close() {
                warn!("Failed to close DuckDB connection: {}", e);
            }
        }
        debug!("DuckDB pool closed ({} idle connections released)", count);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.permits.is_closed()
    }

    pub fn size(&self) -> usize {
        self.inner.size
    }

    pub fn idle_count(&self) -> usize {
        self.inner.idle().len()
    }
}

/// A connection checked out of a [`DuckdbPool`].
pub struct PooledConnection {
    conn: Option<Connection>,
    pool: Arc<PoolInner>,
    // Released after `drop` has put the connection back.
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn.as_ref().expect("connection present until drop")
    }
}

impl DerefMut for PooledConnection {
    fn deref_mut(&mut self) -> &mut Connection {
        self.conn.as_mut().expect("connection present until drop")
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if self.pool.permits.is_closed() {
                return;
            }
            self.pool.idle().push(conn);
        }
    }
}
