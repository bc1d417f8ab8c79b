//! CIDR functions.
//!
//! Addresses of both families are held as `u128`; IPv4 uses the low 32
//! bits. Arithmetic wraps within the family's width. For `cidrcontains`,
//! IPv4-mapped IPv6 addresses and prefixes count as IPv4.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use hfn_function::{argument_error, family_mismatch, CallContext, FuncError, Function, Param};
use hfn_value::{Type, Value};

use crate::helpers::{int_arg, str_arg};
use crate::table::FunctionTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Family {
    V4,
    V6,
}

impl Family {
    fn width(self) -> u32 {
        match self {
            Family::V4 => 32,
            Family::V6 => 128,
        }
    }

    /// All ones across the family's width.
    fn full(self) -> u128 {
        u128::MAX >> (128 - self.width())
    }

    fn mask(self, len: u32) -> u128 {
        let all = self.full();
        all & !all.checked_shr(len).unwrap_or(0)
    }

    fn name(self) -> &'static str {
        match self {
            Family::V4 => "IPv4",
            Family::V6 => "IPv6",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Addr {
    family: Family,
    bits: u128,
}

impl Addr {
    fn v4(addr: Ipv4Addr) -> Self {
        Addr {
            family: Family::V4,
            bits: u128::from(u32::from(addr)),
        }
    }

    fn v6(addr: Ipv6Addr) -> Self {
        Addr {
            family: Family::V6,
            bits: u128::from(addr),
        }
    }

    /// Parse a bare address.
    fn parse(s: &str) -> Option<Self> {
        match s.parse::<IpAddr>().ok()? {
            IpAddr::V4(v4) => Some(Addr::v4(v4)),
            IpAddr::V6(v6) => Some(v6.to_ipv4_mapped().map_or_else(|| Addr::v6(v6), Addr::v4)),
        }
    }
}

impl fmt::Display for Addr {
    #[allow(clippy::cast_possible_truncation)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.family {
            Family::V4 => write!(f, "{}", Ipv4Addr::from(self.bits as u32)),
            Family::V6 => write!(f, "{}", Ipv6Addr::from(self.bits)),
        }
    }
}

/// A network prefix; host bits of `network` are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Prefix {
    network: Addr,
    len: u32,
}

impl Prefix {
    fn new(family: Family, bits: u128, len: u32) -> Self {
        Prefix {
            network: Addr {
                family,
                bits: bits & family.mask(len),
            },
            len,
        }
    }

    /// Parse `address/length`. The family follows the address notation.
    fn parse(s: &str) -> Option<Self> {
        let (ip, len) = s.split_once('/')?;
        if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let len: u32 = len.parse().ok()?;
        let addr = match ip.parse::<IpAddr>().ok()? {
            IpAddr::V4(v4) => Addr::v4(v4),
            IpAddr::V6(v6) => Addr::v6(v6),
        };
        if len > addr.family.width() {
            return None;
        }
        Some(Prefix::new(addr.family, addr.bits, len))
    }

    fn family(&self) -> Family {
        self.network.family
    }

    /// A prefix inside the IPv4-mapped range `::ffff:0:0/96` as the IPv4
    /// prefix it covers.
    fn unmapped(self) -> Prefix {
        let bits = self.network.bits;
        if self.family() == Family::V6 && self.len >= 96 && bits >> 32 == 0xffff {
            Prefix::new(Family::V4, bits & Family::V4.full(), self.len - 96)
        } else {
            self
        }
    }

    fn first(&self) -> Addr {
        self.network
    }

    fn last(&self) -> Addr {
        let family = self.family();
        Addr {
            family,
            bits: self.network.bits | (family.full() & !family.mask(self.len)),
        }
    }

    fn host_bits(&self) -> u32 {
        self.family().width() - self.len
    }

    fn contains(&self, addr: Addr) -> bool {
        addr.family == self.family() && addr.bits & self.family().mask(self.len) == self.network.bits
    }

    /// The subnet of length `len` just before this prefix's first address.
    fn previous(&self, len: u32) -> Prefix {
        let family = self.family();
        let before = self.network.bits.wrapping_sub(1) & family.full();
        Prefix::new(family, before, len)
    }

    /// The subnet of length `len` just after this prefix's last address, and
    /// whether the address space wrapped around.
    fn next(&self, len: u32) -> (Prefix, bool) {
        let family = self.family();
        let current = Prefix::new(family, self.last().bits, len);
        let after = current.last().bits.wrapping_add(1) & family.full();
        (Prefix::new(family, after, len), after == 0)
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.len)
    }
}

fn prefix_arg(args: &[Value], i: usize) -> Result<Prefix, FuncError> {
    let s = str_arg(args, i)?;
    Prefix::parse(s).ok_or_else(|| argument_error(format!("invalid CIDR address: {s}")).at_arg(i))
}

fn contains_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let containing_text = str_arg(args, 0)?;
    let containing = prefix_arg(args, 0)?.unmapped();
    let contained_text = str_arg(args, 1)?;

    // A bare address first, then a prefix spanning first..=last.
    let (first, last) = match Addr::parse(contained_text) {
        Some(addr) => (addr, None),
        None => {
            let prefix = Prefix::parse(contained_text).map(Prefix::unmapped).ok_or_else(|| {
                argument_error(format!("invalid IP address or prefix: {contained_text}")).at_arg(1)
            })?;
            (prefix.first(), Some(prefix.last()))
        }
    };

    if first.family != containing.family() {
        return Err(family_mismatch(containing_text, contained_text));
    }

    let result = containing.contains(first) && last.map_or(true, |l| containing.contains(l));
    Ok(Value::bool(result))
}

/// Whether an address or prefix lies entirely within a prefix.
pub fn cidrcontains() -> Function {
    Function::returning("cidrcontains", Type::Bool, contains_body)
        .with_param(Param::new("containing_prefix", Type::String))
        .with_param(Param::new("contained_ip_or_prefix", Type::String))
        .with_description("Checks whether an IP address or prefix is within a prefix.")
}

fn host_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let prefix = prefix_arg(args, 0)?;
    let hostnum = int_arg(args, 1)?;
    let capacity = 1u128.checked_shl(prefix.host_bits());
    let no_room = || {
        argument_error(format!(
            "prefix of {} does not accommodate a host numbered {hostnum}",
            prefix.len
        ))
        .at_arg(1)
    };

    let host = if hostnum >= 0 {
        let host = u128::from(hostnum.unsigned_abs());
        if capacity.is_some_and(|c| host >= c) {
            return Err(no_room());
        }
        host
    } else {
        let back = u128::from(hostnum.unsigned_abs());
        match capacity {
            Some(c) if back > c => return Err(no_room()),
            Some(c) => c - back,
            None => 0u128.wrapping_sub(back),
        }
    };

    let addr = Addr {
        family: prefix.family(),
        bits: prefix.network.bits | host,
    };
    Ok(Value::string(addr.to_string()))
}

/// The address of a numbered host within a prefix. Negative numbers count
/// back from the end of the range.
pub fn cidrhost() -> Function {
    Function::returning("cidrhost", Type::String, host_body)
        .with_param(Param::new("prefix", Type::String))
        .with_param(Param::new("hostnum", Type::Number))
        .not_null()
}

#[allow(clippy::cast_possible_truncation)]
fn netmask_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let prefix = prefix_arg(args, 0)?;
    if prefix.family() != Family::V4 {
        return Err(argument_error(format!(
            "IPv6 addresses cannot have a netmask: {}",
            str_arg(args, 0)?
        ))
        .at_arg(0));
    }
    let mask = Ipv4Addr::from(Family::V4.mask(prefix.len) as u32);
    Ok(Value::string(mask.to_string()))
}

/// The dotted netmask of an IPv4 prefix.
pub fn cidrnetmask() -> Function {
    Function::returning("cidrnetmask", Type::String, netmask_body)
        .with_param(Param::new("prefix", Type::String))
        .not_null()
}

fn subnet_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let prefix = prefix_arg(args, 0)?;
    let newbits = int_arg(args, 1)?;
    let netnum = int_arg(args, 2)?;

    let Ok(newbits) = u32::try_from(newbits) else {
        return Err(argument_error("newbits must not be negative").at_arg(1));
    };
    let new_len = prefix.len.saturating_add(newbits);
    if new_len > prefix.family().width() {
        return Err(argument_error(format!(
            "insufficient address space to extend prefix of {} by {newbits}",
            prefix.len
        ))
        .at_arg(1));
    }

    let max = 1u128.checked_shl(newbits).map(|n| n - 1).unwrap_or(u128::MAX);
    let num = u128::try_from(netnum).ok().filter(|n| *n <= max).ok_or_else(|| {
        argument_error(format!(
            "prefix extension of {newbits} does not accommodate a subnet numbered {netnum}"
        ))
        .at_arg(2)
    })?;

    let shift = prefix.family().width() - new_len;
    let bits = prefix.network.bits | num.checked_shl(shift).unwrap_or(0);
    let subnet = Prefix::new(prefix.family(), bits, new_len);
    Ok(Value::string(subnet.to_string()))
}

/// A numbered subnet obtained by extending a prefix by `newbits`.
pub fn cidrsubnet() -> Function {
    Function::returning("cidrsubnet", Type::String, subnet_body)
        .with_param(Param::new("prefix", Type::String))
        .with_param(Param::new("newbits", Type::Number))
        .with_param(Param::new("netnum", Type::Number))
        .not_null()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn subnets_body(_: &CallContext, args: &[Value], _: &Type) -> Result<Value, FuncError> {
    let network = prefix_arg(args, 0)?;
    let family = network.family();
    let start_len = network.len;

    if args.len() == 1 {
        return Ok(Value::empty_list(Type::String));
    }

    let first_len = (i64::from(start_len) + int_arg(args, 1)?).clamp(0, i64::from(family.width()));
    let mut current = network.previous(first_len as u32);
    let mut out = Vec::with_capacity(args.len() - 1);

    for i in 1..args.len() {
        let extend = int_arg(args, i)?;
        if extend < 1 {
            return Err(argument_error("must extend prefix by at least one bit").at_arg(i));
        }
        if extend > 32 {
            return Err(argument_error("may not extend prefix by more than 32 bits").at_arg(i));
        }
        let len = start_len + extend as u32;
        if len > family.width() {
            return Err(argument_error(format!(
                "would extend prefix to {len} bits, which is too long for an {} address",
                family.name()
            ))
            .at_arg(i));
        }

        let (next, rollover) = current.next(len);
        if rollover || !network.contains(next.first()) {
            return Err(argument_error(format!(
                "not enough remaining address space for a subnet with a prefix of {len} bits after {current}"
            ))
            .at_arg(i));
        }
        current = next;
        out.push(Value::string(current.to_string()));
    }

    Ok(Value::list(Type::String, out))
}

/// Consecutive subnets of a prefix, one per requested extension.
pub fn cidrsubnets() -> Function {
    Function::returning("cidrsubnets", Type::list(Type::String), subnets_body)
        .with_param(Param::new("prefix", Type::String))
        .with_var_param(Param::new("newbits", Type::Number))
        .not_null()
}

pub(crate) fn register(table: &mut FunctionTable) {
    table.insert(cidrcontains());
    table.insert(cidrhost());
    table.insert(cidrnetmask());
    table.insert(cidrsubnet());
    table.insert(cidrsubnets());
}
