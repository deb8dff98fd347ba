//! Builtin declarations.
//!
//! The magic globals (`msg`, `block`, `tx`, `abi`) and the intrinsic members
//! of `address` and `bytes` values are modeled as ordinary contracts in a
//! synthetic source file, parsed with the regular parser and resolved with
//! the regular machinery. The `$` prefix keeps the type names out of user
//! namespaces (`$` is a legal Solidity identifier character) and lets
//! presentation layers filter them from completion.
//!
//! The file is injected into every [`Project`](super::Project) at
//! construction; there is no process-wide shared instance.

/// Path the builtins file is stored under. Not importable from user code.
pub const BUILTINS_PATH: &str = "solsema:builtins";

pub(super) const BUILTINS_SOURCE: &str = r#"
contract $Address {
    uint256 balance;
    function transfer(uint256 amount) public {}
    function send(uint256 amount) public returns (bool ok) {}
}

contract $Bytes {
    uint256 length;
}

contract $Msg {
    address sender;
    uint256 value;
    bytes data;
    uint256 gas;
    bytes4 sig;
}

contract $Block {
    address coinbase;
    uint256 difficulty;
    uint256 gaslimit;
    uint256 number;
    uint256 timestamp;
}

contract $Tx {
    uint256 gasprice;
    address origin;
}

contract $Abi {
    function encode() public pure returns (bytes memory) {}
    function encodePacked() public pure returns (bytes memory) {}
}

contract $Globals {
    $Msg msg;
    $Block block;
    $Tx tx;
    $Abi abi;
}
"#;

/// Contract in the builtins file whose state variables are the magic globals.
pub(crate) const GLOBALS_CONTRACT: &str = "$Globals";

/// Builtin contract modeling the intrinsic members of `address` values.
pub(crate) const ADDRESS_CONTRACT: &str = "$Address";

/// Builtin contract modeling the intrinsic members of `bytes` values.
pub(crate) const BYTES_CONTRACT: &str = "$Bytes";
