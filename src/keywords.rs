/// Reserved words shared by every built-in dialect (SQL:2003 core).
pub const ANSI_RESERVED: &[&str] = &[
    "ALL", "ALLOCATE", "ALTER", "AND", "ANY", "ARE", "ARRAY", "AS", "ASYMMETRIC", "AT",
    "AUTHORIZATION", "BEGIN", "BETWEEN", "BIGINT", "BINARY", "BLOB", "BOOLEAN", "BOTH", "BY",
    "CALL", "CALLED", "CASCADED", "CASE", "CAST", "CHAR", "CHARACTER", "CHECK", "CLOB", "CLOSE",
    "COLLATE", "COLUMN", "COMMIT", "CONNECT", "CONSTRAINT", "CONTINUE", "CORRESPONDING", "CREATE",
    "CROSS", "CUBE", "CURRENT", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "CURRENT_USER", "CURSOR", "CYCLE", "DATE", "DAY", "DEALLOCATE", "DEC", "DECIMAL", "DECLARE",
    "DEFAULT", "DELETE", "DESCRIBE", "DETERMINISTIC", "DISCONNECT", "DISTINCT", "DOUBLE", "DROP",
    "DYNAMIC", "EACH", "ELSE", "END", "ESCAPE", "EXCEPT", "EXEC", "EXECUTE", "EXISTS", "EXTERNAL",
    "FALSE", "FETCH", "FILTER", "FLOAT", "FOR", "FOREIGN", "FREE", "FROM", "FULL", "FUNCTION",
    "GET", "GLOBAL", "GRANT", "GROUP", "GROUPING", "HAVING", "HOLD", "HOUR", "IDENTITY", "IN",
    "INDICATOR", "INNER", "INOUT", "INSENSITIVE", "INSERT", "INT", "INTEGER", "INTERSECT",
    "INTERVAL", "INTO", "IS", "JOIN", "LANGUAGE", "LARGE", "LATERAL", "LEADING", "LEFT", "LIKE",
    "LOCAL", "LOCALTIME", "LOCALTIMESTAMP", "MATCH", "MERGE", "METHOD", "MINUTE", "MODIFIES",
    "MODULE", "MONTH", "NATIONAL", "NATURAL", "NCHAR", "NCLOB", "NEW", "NO", "NONE", "NOT",
    "NULL", "NUMERIC", "OF", "OLD", "ON", "ONLY", "OPEN", "OR", "ORDER", "OUT", "OUTER", "OVER",
    "OVERLAPS", "PARAMETER", "PARTITION", "PRECISION", "PREPARE", "PRIMARY", "PROCEDURE", "RANGE",
    "READS", "REAL", "RECURSIVE", "REF", "REFERENCES", "REFERENCING", "RELEASE", "RETURN",
    "RETURNS", "REVOKE", "RIGHT", "ROLLBACK", "ROLLUP", "ROW", "ROWS", "SAVEPOINT", "SCOPE",
    "SCROLL", "SEARCH", "SECOND", "SELECT", "SENSITIVE", "SESSION_USER", "SET", "SIMILAR",
    "SMALLINT", "SOME", "SPECIFIC", "SQL", "SQLEXCEPTION", "SQLSTATE", "SQLWARNING", "START",
    "STATIC", "SUBMULTISET", "SYMMETRIC", "SYSTEM", "SYSTEM_USER", "TABLE", "THEN", "TIME",
    "TIMESTAMP", "TIMEZONE_HOUR", "TIMEZONE_MINUTE", "TO", "TRAILING", "TRANSLATION", "TREAT",
    "TRIGGER", "TRUE", "UNION", "UNIQUE", "UNKNOWN", "UNNEST", "UPDATE", "USER", "USING", "VALUE",
    "VALUES", "VARCHAR", "VARYING", "WHEN", "WHENEVER", "WHERE", "WINDOW", "WITH", "WITHIN",
    "WITHOUT", "YEAR",
];

const POSTGRES_RESERVED: &[&str] = &[
    "ANALYSE", "ANALYZE", "ASC", "CONCURRENTLY", "DEFERRABLE", "DESC", "DO", "FREEZE", "ILIKE",
    "INITIALLY", "ISNULL", "LIMIT", "NOTNULL", "OFFSET", "PLACING", "RETURNING", "TABLESAMPLE",
    "VARIADIC", "VERBOSE",
];

const MYSQL_RESERVED: &[&str] = &[
    "ACCESSIBLE", "ADD", "ANALYZE", "ASC", "BEFORE", "CHANGE", "DATABASE", "DATABASES",
    "DAY_HOUR", "DAY_MINUTE", "DELAYED", "DESC", "DISTINCTROW", "DIV", "DUAL", "ENCLOSED",
    "ESCAPED", "EXPLAIN", "FORCE", "FULLTEXT", "HIGH_PRIORITY", "IGNORE", "INDEX", "INFILE",
    "KEY", "KEYS", "KILL", "LIMIT", "LINES", "LOAD", "LOCK", "LONG", "LONGTEXT", "LOOP",
    "MEDIUMINT", "MOD", "OPTIMIZE", "OPTION", "OUTFILE", "PURGE", "READ", "REGEXP", "RENAME",
    "REPEAT", "REPLACE", "REQUIRE", "RLIKE", "SCHEMA", "SCHEMAS", "SEPARATOR", "SHOW", "SPATIAL",
    "SQL_BIG_RESULT", "STRAIGHT_JOIN", "TERMINATED", "TINYINT", "UNLOCK", "UNSIGNED", "USAGE",
    "USE", "UTC_DATE", "UTC_TIMESTAMP", "WRITE", "XOR", "ZEROFILL",
];

const ORACLE_RESERVED: &[&str] = &[
    "ACCESS", "ADD", "AUDIT", "CLUSTER", "COMMENT", "COMPRESS", "EXCLUSIVE", "FILE",
    "IDENTIFIED", "IMMEDIATE", "INCREMENT", "INDEX", "INITIAL", "LEVEL", "LOCK", "LONG",
    "MAXEXTENTS", "MINUS", "MLSLABEL", "MODE", "MODIFY", "NOAUDIT", "NOCOMPRESS", "NOWAIT",
    "NUMBER", "OFFLINE", "ONLINE", "OPTION", "PCTFREE", "PRIOR", "PRIVILEGES", "PUBLIC", "RAW",
    "RENAME", "RESOURCE", "ROWID", "ROWNUM", "SESSION", "SHARE", "SIZE", "START", "SUCCESSFUL",
    "SYNONYM", "SYSDATE", "UID", "VALIDATE", "VARCHAR2", "VIEW",
];

const SQLSERVER_RESERVED: &[&str] = &[
    "ADD", "BACKUP", "BREAK", "BROWSE", "BULK", "CHECKPOINT", "CLUSTERED", "COMPUTE",
    "CONTAINS", "CONTAINSTABLE", "DATABASE", "DBCC", "DENY", "DISK", "DISTRIBUTED", "DUMP",
    "ERRLVL", "EXIT", "FILE", "FILLFACTOR", "FREETEXT", "FREETEXTTABLE", "GOTO", "HOLDLOCK",
    "IDENTITY_INSERT", "IDENTITYCOL", "INDEX", "KEY", "KILL", "LINENO", "LOAD", "NOCHECK",
    "NONCLUSTERED", "OFFSETS", "OPENDATASOURCE", "OPENQUERY", "OPENROWSET", "OPENXML", "PERCENT",
    "PIVOT", "PLAN", "PRINT", "PROC", "PUBLIC", "RAISERROR", "READTEXT", "RECONFIGURE",
    "REPLICATION", "RESTORE", "RESTRICT", "REVERT", "ROWCOUNT", "ROWGUIDCOL", "RULE", "SAVE",
    "SCHEMA", "SETUSER", "SHUTDOWN", "STATISTICS", "TEXTSIZE", "TOP", "TRAN", "TRANSACTION",
    "TRUNCATE", "TSEQUAL", "UNPIVOT", "UPDATETEXT", "USE", "VIEW", "WAITFOR", "WHILE",
    "WRITETEXT",
];

const SQLITE_RESERVED: &[&str] = &[
    "ABORT", "ACTION", "ADD", "AFTER", "ANALYZE", "ASC", "ATTACH", "AUTOINCREMENT", "BEFORE",
    "CONFLICT", "DATABASE", "DEFERRABLE", "DEFERRED", "DESC", "DETACH", "EXCLUSIVE", "EXPLAIN",
    "FAIL", "GLOB", "IGNORE", "IMMEDIATE", "INDEX", "INDEXED", "INSTEAD", "ISNULL", "KEY",
    "LIMIT", "NOTNULL", "OFFSET", "PLAN", "PRAGMA", "QUERY", "RAISE", "REGEXP", "REINDEX",
    "RENAME", "REPLACE", "RESTRICT", "TEMP", "TEMPORARY", "VACUUM", "VIEW", "VIRTUAL",
];

const DB2_RESERVED: &[&str] = &[
    "ADD", "AFTER", "ALIAS", "AUDIT", "AUX", "AUXILIARY", "BEFORE", "BUFFERPOOL", "CAPTURE",
    "CCSID", "CLUSTER", "COLLECTION", "COLLID", "COMMENT", "CONCAT", "DATABASE", "DAYS",
    "DBINFO", "DESCRIPTOR", "DSSIZE", "EDITPROC", "ENCODING", "ERASE", "EXPLAIN", "FENCED",
    "FIELDPROC", "HOURS", "IMMEDIATE", "INDEX", "INHERIT", "KEEP", "LABEL", "LOCKSIZE",
    "MICROSECOND", "MICROSECONDS", "MINUTES", "MONTHS", "NUMPARTS", "OBID", "OPTIMIZATION",
    "OPTIMIZE", "PACKAGE", "PADDED", "PART", "PATH", "PIECESIZE", "PLAN", "PRIQTY", "PROGRAM",
    "PSID", "QUERYNO", "SCHEMA", "SECONDS", "SECQTY", "STOGROUP", "SYNONYM", "TABLESPACE",
    "VALIDPROC", "VCAT", "VIEW", "VOLUMES", "YEARS",
];

const H2_RESERVED: &[&str] = &[
    "CONSTRAINT", "CURRENT_CATALOG", "CURRENT_SCHEMA", "DEFAULT", "EXCEPT", "FETCH", "ILIKE",
    "INTERSECTS", "KEY", "LIMIT", "MINUS", "OFFSET", "QUALIFY", "REGEXP", "ROWNUM", "SYSDATE",
    "SYSTIME", "SYSTIMESTAMP", "TODAY", "TOP", "_ROWID_",
];

/// Dialect-specific additions on top of [`ANSI_RESERVED`].
pub fn dialect_reserved(id: &str) -> &'static [&'static str] {
    match id {
        "postgres" => POSTGRES_RESERVED,
        "mysql" => MYSQL_RESERVED,
        "oracle" => ORACLE_RESERVED,
        "sqlserver" => SQLSERVER_RESERVED,
        "sqlite" => SQLITE_RESERVED,
        "db2" => DB2_RESERVED,
        "h2" => H2_RESERVED,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lists_are_uppercase() {
        for id in ["generic", "postgres", "mysql", "oracle", "sqlserver", "sqlite", "db2", "h2"] {
            for word in ANSI_RESERVED.iter().chain(dialect_reserved(id)) {
                assert_eq!(*word, word.to_ascii_uppercase(), "{id}: {word}");
            }
        }
    }

    #[test]
    fn dialect_additions_extend_the_core_list() {
        assert!(ANSI_RESERVED.contains(&"SELECT"));
        assert!(dialect_reserved("postgres").contains(&"LIMIT"));
        assert!(dialect_reserved("oracle").contains(&"NUMBER"));
        assert!(dialect_reserved("generic").is_empty());
    }
}
